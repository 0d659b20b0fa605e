use crate::{ast::Node, error::LispError, value::Value};

/// Translate a parse tree into the value tree the evaluator consumes.
pub fn read(node: &Node) -> Value {
    if node.tag.contains("number") {
        return read_number(&node.contents);
    }
    if node.tag.contains("symbol") {
        return Value::symbol(node.contents.as_str());
    }

    let list = if node.tag.contains("qexpr") {
        Value::qexpr()
    } else {
        // The root marker and `sexpr` nodes
        Value::sexpr()
    };
    node.children
        .iter()
        .filter(|child| !child.is_punctuation())
        .fold(list, |list, child| list.push(read(child)))
}

fn read_number(contents: &str) -> Value {
    contents
        .parse::<i64>()
        .map_or_else(|_| LispError::InvalidNumber.into(), Value::Number)
}
