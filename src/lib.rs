//! A small Lisp with quoted lists, evaluated over an exclusively owned value
//! tree.
//!
//! Source text goes through [`parse`](parse::parse) to an AST, through
//! [`read`](read::read) to a [`Value`], is reduced by
//! [`evaluate`](eval::evaluate) against an [`Env`] and turned back into
//! text by [`render`](print::render).

pub mod ast;
pub mod builtin;
pub mod env;
pub mod error;
pub mod eval;
pub mod parse;
pub mod print;
pub mod read;
pub mod repl;
pub mod value;

pub use crate::{
    builtin::Builtin,
    env::Env,
    error::LispError,
    eval::evaluate,
    parse::{parse, ParseResult},
    print::render,
    read::read,
    value::Value,
};

/// Parse, read and evaluate one line of source.
pub fn eval_source(env: &mut Env, source: &str) -> ParseResult<Value> {
    let tree = parse(source)?;
    Ok(evaluate(env, read(&tree)))
}
