//! Serialization of trees back to bracketed text
//!
//! The structural inverse of the parser for any parsed node: a node
//! renders as `(label child …)` with a single space before each child and
//! no padding inside the parentheses. String atoms are wrapped in double
//! quotes without re-escaping; raw atoms are emitted verbatim, so numbers
//! keep their exact source spelling.

use crate::sexpr::tree::{Node, Value};
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Node(node) => node.fmt(f),
            Value::Str(text) => write!(f, "\"{}\"", text),
            Value::Raw(text) => f.write_str(text),
        }
    }
}

/// Render a node as bracketed text
pub fn serialize(node: &Node) -> String {
    node.to_string()
}

/// Render a node as pretty-printed JSON, for inspection
pub fn to_json(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}
