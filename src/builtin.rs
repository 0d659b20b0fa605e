use derive_more::Display;

use crate::{
    env::Env,
    error::{Arity, LispError},
    eval::evaluate,
    value::{Kind, Value},
};

pub type BuiltinResult = Result<Value, LispError>;

/// A library operation. Values refer to builtins by this identifier, and the
/// `Display` form is the name it is registered under.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    #[display(fmt = "list")]
    List,
    #[display(fmt = "head")]
    Head,
    #[display(fmt = "tail")]
    Tail,
    #[display(fmt = "eval")]
    Eval,
    #[display(fmt = "join")]
    Join,
    #[display(fmt = "cons")]
    Cons,
    #[display(fmt = "init")]
    Init,
    #[display(fmt = "len")]
    Len,
    #[display(fmt = "def")]
    Def,
    #[display(fmt = "+")]
    Add,
    #[display(fmt = "-")]
    Sub,
    #[display(fmt = "*")]
    Mul,
    #[display(fmt = "/")]
    Div,
    #[display(fmt = "%")]
    Rem,
    #[display(fmt = "^")]
    Pow,
    #[display(fmt = "max")]
    Max,
    #[display(fmt = "min")]
    Min,
    #[display(fmt = "exit")]
    Exit,
    #[display(fmt = "printenv")]
    PrintEnv,
}

impl Builtin {
    /// Every builtin, in registration order.
    pub const ALL: [Builtin; 19] = [
        Builtin::List,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Eval,
        Builtin::Join,
        Builtin::Cons,
        Builtin::Init,
        Builtin::Len,
        Builtin::Def,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Rem,
        Builtin::Pow,
        Builtin::Max,
        Builtin::Min,
        Builtin::Exit,
        Builtin::PrintEnv,
    ];

    /// Effectful zero-argument builtins that still run when they are the
    /// only element of an expression.
    pub fn runs_alone(self) -> bool {
        matches!(self, Builtin::Exit | Builtin::PrintEnv)
    }

    fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Builtin::Add
                | Builtin::Sub
                | Builtin::Mul
                | Builtin::Div
                | Builtin::Rem
                | Builtin::Pow
                | Builtin::Max
                | Builtin::Min
        )
    }

    /// Run the operation on already evaluated arguments.
    pub fn call(self, args: Vec<Value>, env: &mut Env) -> Value {
        tracing::debug!(builtin = %self, args = args.len(), "calling builtin");
        let result = match self {
            Builtin::List => list(args),
            Builtin::Head => head(args),
            Builtin::Tail => tail(args),
            Builtin::Init => init(args),
            Builtin::Len => len(args),
            Builtin::Join => join(args),
            Builtin::Cons => cons(args),
            Builtin::Eval => eval(args, env),
            Builtin::Def => def(args, env),
            Builtin::Exit => exit(env),
            Builtin::PrintEnv => printenv(env),
            op => arithmetic(op, args),
        };
        result.unwrap_or_else(Value::Error)
    }
}

/// Bind every builtin under its own name.
pub fn add_builtins(env: &mut Env) {
    for builtin in Builtin::ALL.iter() {
        env.put(&builtin.to_string(), &Value::Builtin(*builtin));
    }
}

fn expect_count(func: Builtin, args: &[Value], count: usize) -> Result<(), LispError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(LispError::Arity {
            func,
            got: args.len(),
            expected: Arity::Exactly(count),
        })
    }
}

fn expect_at_least(func: Builtin, args: &[Value], count: usize) -> Result<(), LispError> {
    if args.len() >= count {
        Ok(())
    } else {
        Err(LispError::Arity {
            func,
            got: args.len(),
            expected: Arity::AtLeast(count),
        })
    }
}

fn type_error(func: Builtin, index: usize, got: &Value, expected: Kind) -> LispError {
    LispError::Type {
        func,
        index,
        got: got.kind(),
        expected,
    }
}

/// Unwrap a Q-expression argument into its children.
fn expect_list(func: Builtin, index: usize, arg: Value) -> Result<Vec<Value>, LispError> {
    match arg {
        Value::QExpr(cells) => Ok(cells),
        other => Err(type_error(func, index, &other, Kind::QExpr)),
    }
}

/// Validate a call taking exactly one list and return that list's children.
fn single_list(func: Builtin, args: Vec<Value>, non_empty: bool) -> Result<Vec<Value>, LispError> {
    expect_count(func, &args, 1)?;
    let arg = args
        .into_iter()
        .next()
        .ok_or(LispError::OutOfBounds { index: 0, len: 0 })?;
    let cells = expect_list(func, 0, arg)?;
    if non_empty && cells.is_empty() {
        return Err(LispError::EmptyList { func });
    }
    Ok(cells)
}

fn list(args: Vec<Value>) -> BuiltinResult {
    Ok(Value::QExpr(args))
}

fn head(args: Vec<Value>) -> BuiltinResult {
    let mut cells = single_list(Builtin::Head, args, true)?;
    cells.truncate(1);
    Ok(Value::QExpr(cells))
}

fn tail(args: Vec<Value>) -> BuiltinResult {
    let mut cells = single_list(Builtin::Tail, args, true)?;
    cells.remove(0);
    Ok(Value::QExpr(cells))
}

fn init(args: Vec<Value>) -> BuiltinResult {
    let mut cells = single_list(Builtin::Init, args, true)?;
    cells.pop();
    Ok(Value::QExpr(cells))
}

fn len(args: Vec<Value>) -> BuiltinResult {
    let cells = single_list(Builtin::Len, args, false)?;
    Ok(Value::Number(cells.len() as i64))
}

fn join(args: Vec<Value>) -> BuiltinResult {
    expect_at_least(Builtin::Join, &args, 1)?;
    let mut joined = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        joined.extend(expect_list(Builtin::Join, index, arg)?);
    }
    Ok(Value::QExpr(joined))
}

fn cons(args: Vec<Value>) -> BuiltinResult {
    expect_count(Builtin::Cons, &args, 2)?;
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(first), Some(rest)) => {
            let mut cells = expect_list(Builtin::Cons, 1, rest)?;
            cells.insert(0, first);
            Ok(Value::QExpr(cells))
        }
        _ => Err(LispError::OutOfBounds { index: 1, len: 0 }),
    }
}

fn eval(args: Vec<Value>, env: &mut Env) -> BuiltinResult {
    let cells = single_list(Builtin::Eval, args, false)?;
    Ok(evaluate(env, Value::SExpr(cells)))
}

fn def(args: Vec<Value>, env: &mut Env) -> BuiltinResult {
    expect_at_least(Builtin::Def, &args, 1)?;
    let mut args = args.into_iter();
    let names = match args.next() {
        Some(first) => expect_list(Builtin::Def, 0, first)?,
        None => return Err(LispError::OutOfBounds { index: 0, len: 0 }),
    };
    let values: Vec<Value> = args.collect();

    let mut symbols = Vec::with_capacity(names.len());
    for (index, name) in names.into_iter().enumerate() {
        match name {
            Value::Symbol(symbol) => symbols.push(symbol),
            other => {
                return Err(LispError::DefNonSymbol {
                    index: index + 1,
                    got: other.kind(),
                })
            }
        }
    }
    if symbols.len() != values.len() {
        return Err(LispError::DefCountMismatch {
            symbols: symbols.len(),
            values: values.len(),
        });
    }

    for (symbol, value) in symbols.iter().zip(&values) {
        env.put(symbol, value);
    }
    Ok(Value::sexpr())
}

fn exit(env: &mut Env) -> BuiltinResult {
    tracing::debug!("exit requested");
    env.stop();
    Ok(Value::symbol("Exiting"))
}

fn printenv(env: &mut Env) -> BuiltinResult {
    env.print_names()
        .map_err(|e| LispError::Output(e.to_string()))?;
    Ok(Value::sexpr())
}

fn arithmetic(op: Builtin, args: Vec<Value>) -> BuiltinResult {
    debug_assert!(op.is_arithmetic(), "{} is not arithmetic", op);
    expect_at_least(op, &args, 1)?;
    let numbers = args
        .iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Value::Number(n) => Ok(*n),
            other => Err(type_error(op, index, other, Kind::Number)),
        })
        .collect::<Result<Vec<i64>, _>>()?;

    let (first, rest) = match numbers.split_first() {
        Some((first, rest)) => (*first, rest),
        None => return Err(LispError::OutOfBounds { index: 0, len: 0 }),
    };
    if op == Builtin::Sub && rest.is_empty() {
        return Ok(Value::Number(first.wrapping_neg()));
    }
    rest.iter()
        .try_fold(first, |acc, &n| apply(op, acc, n))
        .map(Value::Number)
}

fn apply(op: Builtin, x: i64, y: i64) -> Result<i64, LispError> {
    Ok(match op {
        Builtin::Add => x.wrapping_add(y),
        Builtin::Sub => x.wrapping_sub(y),
        Builtin::Mul => x.wrapping_mul(y),
        Builtin::Div if y == 0 => return Err(LispError::DivideByZero),
        Builtin::Div => x.wrapping_div(y),
        Builtin::Rem if y == 0 => return Err(LispError::DivideByZero),
        Builtin::Rem => x.wrapping_rem(y),
        Builtin::Pow => power(x, y)?,
        Builtin::Min => x.min(y),
        Builtin::Max => x.max(y),
        op => unreachable!("{} is not arithmetic", op),
    })
}

/// Repeated multiplication by squaring, wrapping like the other operators.
fn power(base: i64, exponent: i64) -> Result<i64, LispError> {
    if exponent < 0 {
        return Err(LispError::NegativeExponent(exponent));
    }
    let mut result: i64 = 1;
    let mut base = base;
    let mut exponent = exponent as u64;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(x: i64) -> Value {
        Value::number(x)
    }

    fn q(cells: Vec<Value>) -> Value {
        Value::QExpr(cells)
    }

    fn call(builtin: Builtin, args: Vec<Value>) -> Value {
        builtin.call(args, &mut Env::with_builtins())
    }

    #[test]
    fn list_ops() {
        let l = || q(vec![n(1), n(2), n(3)]);
        assert_eq!(call(Builtin::Head, vec![l()]), q(vec![n(1)]));
        assert_eq!(call(Builtin::Tail, vec![l()]), q(vec![n(2), n(3)]));
        assert_eq!(call(Builtin::Init, vec![l()]), q(vec![n(1), n(2)]));
        assert_eq!(call(Builtin::Len, vec![l()]), n(3));
        assert_eq!(call(Builtin::Len, vec![q(vec![])]), n(0));
        assert_eq!(call(Builtin::List, vec![n(1), n(2)]), q(vec![n(1), n(2)]));
        assert_eq!(
            call(Builtin::Join, vec![l(), q(vec![]), q(vec![n(4)])]),
            q(vec![n(1), n(2), n(3), n(4)])
        );
        assert_eq!(
            call(Builtin::Cons, vec![n(0), l()]),
            q(vec![n(0), n(1), n(2), n(3)])
        );
    }

    #[test]
    fn empty_lists_are_rejected() {
        for builtin in [Builtin::Head, Builtin::Tail, Builtin::Init].iter() {
            assert_eq!(
                call(*builtin, vec![q(vec![])]),
                Value::Error(LispError::EmptyList { func: *builtin })
            );
        }
    }

    #[test]
    fn arity_and_type_errors() {
        assert_eq!(
            call(Builtin::Head, vec![q(vec![n(1)]), q(vec![n(2)])]),
            Value::Error(LispError::Arity {
                func: Builtin::Head,
                got: 2,
                expected: Arity::Exactly(1),
            })
        );
        assert_eq!(
            call(Builtin::Len, vec![n(1)]),
            Value::Error(LispError::Type {
                func: Builtin::Len,
                index: 0,
                got: Kind::Number,
                expected: Kind::QExpr,
            })
        );
        assert_eq!(
            call(Builtin::Join, vec![q(vec![]), n(1)]),
            Value::Error(LispError::Type {
                func: Builtin::Join,
                index: 1,
                got: Kind::Number,
                expected: Kind::QExpr,
            })
        );
        assert_eq!(
            call(Builtin::Cons, vec![n(1), n(2)]),
            Value::Error(LispError::Type {
                func: Builtin::Cons,
                index: 1,
                got: Kind::Number,
                expected: Kind::QExpr,
            })
        );
        assert_eq!(
            call(Builtin::Add, vec![n(1), Value::symbol("x")]),
            Value::Error(LispError::Type {
                func: Builtin::Add,
                index: 1,
                got: Kind::Symbol,
                expected: Kind::Number,
            })
        );
    }

    #[test]
    fn arithmetic_folds_left() {
        assert_eq!(call(Builtin::Add, vec![n(1), n(2), n(3)]), n(6));
        assert_eq!(call(Builtin::Sub, vec![n(10), n(2), n(3)]), n(5));
        assert_eq!(call(Builtin::Sub, vec![n(4)]), n(-4));
        assert_eq!(call(Builtin::Mul, vec![n(2), n(3), n(4)]), n(24));
        assert_eq!(call(Builtin::Div, vec![n(100), n(5), n(2)]), n(10));
        assert_eq!(call(Builtin::Div, vec![n(-7), n(2)]), n(-3));
        assert_eq!(call(Builtin::Rem, vec![n(-7), n(2)]), n(-1));
        assert_eq!(call(Builtin::Min, vec![n(5), n(-2), n(9)]), n(-2));
        assert_eq!(call(Builtin::Max, vec![n(5), n(-2), n(9)]), n(9));
        assert_eq!(call(Builtin::Add, vec![n(i64::MAX), n(1)]), n(i64::MIN));
        assert_eq!(call(Builtin::Div, vec![n(i64::MIN), n(-1)]), n(i64::MIN));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            call(Builtin::Div, vec![n(10), n(0)]),
            Value::Error(LispError::DivideByZero)
        );
        assert_eq!(
            call(Builtin::Rem, vec![n(10), n(1), n(0)]),
            Value::Error(LispError::DivideByZero)
        );
    }

    #[test]
    fn exponent() {
        assert_eq!(call(Builtin::Pow, vec![n(7), n(0)]), n(1));
        assert_eq!(call(Builtin::Pow, vec![n(7), n(1)]), n(7));
        assert_eq!(call(Builtin::Pow, vec![n(2), n(10)]), n(1024));
        assert_eq!(call(Builtin::Pow, vec![n(2), n(3), n(2)]), n(64));
        assert_eq!(call(Builtin::Pow, vec![n(-3), n(3)]), n(-27));
        assert_eq!(
            call(Builtin::Pow, vec![n(2), n(-1)]),
            Value::Error(LispError::NegativeExponent(-1))
        );
    }

    #[test]
    fn def_binds_positionally() {
        let mut env = Env::with_builtins();
        let result = Builtin::Def.call(
            vec![q(vec![Value::symbol("x"), Value::symbol("y")]), n(1), n(2)],
            &mut env,
        );
        assert_eq!(result, Value::sexpr());
        assert_eq!(env.get("x"), n(1));
        assert_eq!(env.get("y"), n(2));
    }

    #[test]
    fn def_errors() {
        assert_eq!(
            call(Builtin::Def, vec![q(vec![n(1)]), n(2)]),
            Value::Error(LispError::DefNonSymbol {
                index: 1,
                got: Kind::Number,
            })
        );
        assert_eq!(
            call(Builtin::Def, vec![q(vec![Value::symbol("a")]), n(1), n(2)]),
            Value::Error(LispError::DefCountMismatch {
                symbols: 1,
                values: 2,
            })
        );
        assert_eq!(
            call(Builtin::Def, vec![n(1)]),
            Value::Error(LispError::Type {
                func: Builtin::Def,
                index: 0,
                got: Kind::Number,
                expected: Kind::QExpr,
            })
        );
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut env = Env::with_builtins();
        assert_eq!(
            Builtin::Exit.call(Vec::new(), &mut env),
            Value::symbol("Exiting")
        );
        assert!(!env.is_running());
    }

    #[test]
    fn printenv_lists_registration_order() {
        let buf = crate::env::tests::SharedBuf::default();
        let mut env = Env::with_builtins().with_output(buf.clone());
        assert_eq!(Builtin::PrintEnv.call(Vec::new(), &mut env), Value::sexpr());
        let expected: Vec<String> = Builtin::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(buf.contents().lines().collect::<Vec<_>>(), expected);
    }
}
