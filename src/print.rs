use std::fmt;

use itertools::Itertools;

use crate::{env::Env, value::Value};

/// Shown for a builtin that no longer has any name bound to it.
pub const ANONYMOUS_BUILTIN: &str = "<function>";

/// A value paired with the environment used to name its builtins.
pub struct Rendered<'a> {
    pub value: &'a Value,
    pub env: &'a Env,
}

impl<'a> fmt::Display for Rendered<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let env = self.env;
        match self.value {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "Error: {}", e),
            Value::Symbol(name) => write!(f, "{}", name),
            Value::Builtin(builtin) => {
                write!(f, "{}", env.name_of(*builtin).unwrap_or(ANONYMOUS_BUILTIN))
            }
            Value::SExpr(cells) => write!(f, "({})", join_cells(cells, env)),
            Value::QExpr(cells) => write!(f, "{{{}}}", join_cells(cells, env)),
        }
    }
}

fn join_cells(cells: &[Value], env: &Env) -> String {
    cells.iter().map(|value| Rendered { value, env }).join(" ")
}

/// Render `value` as source-like text.
pub fn render(value: &Value, env: &Env) -> String {
    Rendered { value, env }.to_string()
}
