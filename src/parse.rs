use pest::{error::Error as PestError, iterators::Pair, Parser};

use crate::ast::{Node, ROOT_TAG};

pub type ParseResult<T> = Result<T, PestError<Rule>>;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct LispyParser;

/// Parse one line of source into a tree rooted at [`ROOT_TAG`].
pub fn parse(input: &str) -> ParseResult<Node> {
    let mut pairs = LispyParser::parse(Rule::lispy, input)?;
    Ok(match pairs.next() {
        Some(pair) => parse_node(pair),
        None => Node::branch(ROOT_TAG, Vec::new()),
    })
}

fn parse_node(pair: Pair<Rule>) -> Node {
    match pair.as_rule() {
        Rule::lispy => {
            let mut children = vec![Node::leaf("regex", "")];
            children.extend(pair.into_inner().map(parse_node));
            Node::branch(ROOT_TAG, children)
        }
        Rule::number => Node::leaf("expr|number", pair.as_str()),
        Rule::symbol => Node::leaf("expr|symbol", pair.as_str()),
        Rule::sexpr => Node::branch("expr|sexpr", pair.into_inner().map(parse_node).collect()),
        Rule::qexpr => Node::branch("expr|qexpr", pair.into_inner().map(parse_node).collect()),
        Rule::paren_open | Rule::paren_close | Rule::brace_open | Rule::brace_close => {
            Node::leaf("char", pair.as_str())
        }
        Rule::EOI => Node::leaf("regex", ""),
        rule => unreachable!("{:?}", rule),
    }
}
