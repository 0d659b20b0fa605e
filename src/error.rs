use std::fmt;

use crate::{builtin::Builtin, value::Kind};

/// The number of arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// A language-level error. These travel as [`Value::Error`](crate::value::Value)
/// rather than as Rust errors, so any expression can evaluate to one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LispError {
    #[error("Function '{func}' passed incorrect number of arguments. Got {got}, Expected {expected}")]
    Arity {
        func: Builtin,
        got: usize,
        expected: Arity,
    },
    #[error("Function '{func}' passed incorrect type for argument {index}. Got {got}, expected {expected}")]
    Type {
        func: Builtin,
        index: usize,
        got: Kind,
        expected: Kind,
    },
    #[error("Function '{func}' passed {{}}!")]
    EmptyList { func: Builtin },
    #[error("Function 'def' cannot define non-symbol. Argument {index} was a {got}, expected Symbol")]
    DefNonSymbol { index: usize, got: Kind },
    #[error("Function 'def' the amount of symbols passed don't match the amount of values. Got {symbols} symbols and {values} values")]
    DefCountMismatch { symbols: usize, values: usize },
    #[error("Unbound symbol '{0}'")]
    Unbound(String),
    #[error("Divide by zero")]
    DivideByZero,
    #[error("Function '^' passed negative exponent {0}")]
    NegativeExponent(i64),
    #[error("Invalid number")]
    InvalidNumber,
    #[error("S-expression does not start with a function!")]
    NotAFunction,
    #[error("Index {index} out of bounds for a list of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("Could not write environment: {0}")]
    Output(String),
}
