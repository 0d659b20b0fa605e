//! Reduction of value trees.
//!
//! Evaluation is a plain recursion over the tree, so nesting depth is bounded
//! by the host stack. Exhausting it aborts the process; it is not reported as
//! a [`LispError`].

use crate::{env::Env, error::LispError, value::Value};

/// Reduce `value` to a single result.
pub fn evaluate(env: &mut Env, value: Value) -> Value {
    match value {
        Value::Symbol(name) => {
            tracing::trace!(%name, "resolving symbol");
            env.get(&name)
        }
        Value::SExpr(cells) => evaluate_sexpr(env, cells),
        other => other,
    }
}

fn evaluate_sexpr(env: &mut Env, cells: Vec<Value>) -> Value {
    if cells.is_empty() {
        return Value::SExpr(cells);
    }

    // Strictly left to right: a `def` early in the list is visible to the
    // elements after it.
    let cells: Vec<Value> = cells
        .into_iter()
        .map(|cell| evaluate(env, cell))
        .collect();

    if let Some(index) = cells.iter().position(Value::is_error) {
        tracing::trace!(index, "expression produced an error");
        return Value::SExpr(cells).take(index);
    }

    let runs_alone = matches!(cells[0], Value::Builtin(builtin) if builtin.runs_alone());
    if cells.len() == 1 && !runs_alone {
        return Value::SExpr(cells).take(0);
    }

    let mut cells = cells.into_iter();
    match cells.next() {
        Some(Value::Builtin(builtin)) => builtin.call(cells.collect(), env),
        _ => LispError::NotAFunction.into(),
    }
}
