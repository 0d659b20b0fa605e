use derive_more::Display;

use crate::{builtin::Builtin, error::LispError};

/// A runtime value.
///
/// Every value owns its children outright. There is no sharing between two
/// trees, so `clone` is always a full deep copy and mutating one copy can
/// never be observed through another.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Error(LispError),
    Symbol(String),
    Builtin(Builtin),
    /// An expression list, evaluated left to right and then applied.
    SExpr(Vec<Value>),
    /// A quoted list. Never evaluated unless handed to `eval`.
    QExpr(Vec<Value>),
}

/// The tag of a [`Value`], used in type errors.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    #[display(fmt = "Number")]
    Number,
    #[display(fmt = "Error")]
    Error,
    #[display(fmt = "Symbol")]
    Symbol,
    #[display(fmt = "Function")]
    Builtin,
    #[display(fmt = "S-Expression")]
    SExpr,
    #[display(fmt = "Q-Expression")]
    QExpr,
}

impl Value {
    pub fn number(n: i64) -> Self {
        Value::Number(n)
    }

    pub fn symbol<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Value::Symbol(name.into())
    }

    /// The empty expression `()`, used as the unit result.
    pub fn sexpr() -> Self {
        Value::SExpr(Vec::new())
    }

    /// The empty list `{}`.
    pub fn qexpr() -> Self {
        Value::QExpr(Vec::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Number(_) => Kind::Number,
            Value::Error(_) => Kind::Error,
            Value::Symbol(_) => Kind::Symbol,
            Value::Builtin(_) => Kind::Builtin,
            Value::SExpr(_) => Kind::SExpr,
            Value::QExpr(_) => Kind::QExpr,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The children of an expression list, or `None` for a leaf.
    pub fn children(&self) -> Option<&[Value]> {
        match self {
            Value::SExpr(cells) | Value::QExpr(cells) => Some(cells),
            _ => None,
        }
    }

    /// Append a child to an expression list. Leaves are returned unchanged.
    pub fn push(mut self, child: Value) -> Self {
        if let Value::SExpr(cells) | Value::QExpr(cells) = &mut self {
            cells.push(child);
        }
        self
    }

    /// Take the child at `index`, discarding the rest of the list.
    pub fn take(self, index: usize) -> Value {
        match self {
            Value::SExpr(mut cells) | Value::QExpr(mut cells) => {
                if index < cells.len() {
                    cells.swap_remove(index)
                } else {
                    Value::Error(LispError::OutOfBounds {
                        index,
                        len: cells.len(),
                    })
                }
            }
            leaf => Value::Error(LispError::OutOfBounds {
                index,
                len: leaf.children().map_or(0, <[Value]>::len),
            }),
        }
    }
}

impl From<LispError> for Value {
    fn from(error: LispError) -> Self {
        Value::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_name_themselves() {
        assert_eq!(Value::number(1).kind().to_string(), "Number");
        assert_eq!(Value::sexpr().kind().to_string(), "S-Expression");
        assert_eq!(Value::qexpr().kind().to_string(), "Q-Expression");
        assert_eq!(Value::Builtin(Builtin::Head).kind().to_string(), "Function");
    }

    #[test]
    fn clones_are_independent() {
        let original = Value::qexpr()
            .push(Value::number(1))
            .push(Value::qexpr().push(Value::symbol("x")));
        let mut copy = original.clone();
        if let Value::QExpr(cells) = &mut copy {
            cells[0] = Value::number(99);
            if let Value::QExpr(inner) = &mut cells[1] {
                inner.clear();
            }
        }
        assert_eq!(
            original.children().unwrap()[1],
            Value::QExpr(vec![Value::symbol("x")])
        );
        assert_eq!(original.children().unwrap()[0], Value::number(1));
    }

    #[test]
    fn clone_keeps_builtin_identity() {
        let f = Value::Builtin(Builtin::Add);
        assert_eq!(f.clone(), Value::Builtin(Builtin::Add));
    }

    #[test]
    fn take_out_of_bounds() {
        let list = Value::sexpr().push(Value::number(1));
        assert_eq!(
            list.take(3),
            Value::Error(LispError::OutOfBounds { index: 3, len: 1 })
        );
        assert_eq!(
            Value::sexpr().push(Value::number(7)).take(0),
            Value::number(7)
        );
    }

    #[test]
    fn push_ignores_leaves() {
        assert_eq!(Value::number(3).push(Value::number(4)), Value::number(3));
    }
}
