use std::fmt;

/// Tag carried by the node that wraps a whole input line.
pub const ROOT_TAG: &str = ">";

/// A parse tree node.
///
/// `tag` names the grammar rule that produced the node. Leaves carry their
/// token text in `contents`; branches carry their sub-nodes in `children`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub contents: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf<T, C>(tag: T, contents: C) -> Self
    where
        T: Into<String>,
        C: Into<String>,
    {
        Node {
            tag: tag.into(),
            contents: contents.into(),
            children: Vec::new(),
        }
    }

    pub fn branch<T>(tag: T, children: Vec<Node>) -> Self
    where
        T: Into<String>,
    {
        Node {
            tag: tag.into(),
            contents: String::new(),
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.tag == ROOT_TAG
    }

    /// Brackets and input delimiters, which carry no value of their own.
    pub fn is_punctuation(&self) -> bool {
        matches!(self.contents.as_str(), "(" | ")" | "{" | "}") || self.tag == "regex"
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.tag, indent = depth * 2)?;
        if self.contents.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, " '{}'", self.contents)?;
        }
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
