//! In-memory tree representation and traversal primitives
//!
//! A node owns an ordered list of children; each child slot is either a
//! nested node, a string atom, or a raw atom kept as its literal source
//! text. There are no back-references and no sharing. All traversal is
//! depth-first, left to right, pre-order: the order the source text reads.

use serde::Serialize;

/// A child slot in the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// A nested node
    Node(Node),
    /// A string atom, stored without its surrounding quotes
    Str(String),
    /// A bare symbol or number, stored verbatim
    Raw(String),
}

impl Value {
    /// The textual content of an atom; `None` for nested nodes
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(text) | Value::Raw(text) => Some(text),
            Value::Node(_) => None,
        }
    }

    /// The nested node, if this slot holds one
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// A named node with ordered children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub children: Vec<Value>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// First child rendered as atom text, if present
    pub fn first_text(&self) -> Option<&str> {
        self.children.first().and_then(Value::as_text)
    }

    /// First descendant satisfying `predicate`, in document order
    ///
    /// Each child node is tested before its own subtree is searched. The
    /// receiver itself is never tested; callers that want to include it
    /// check it explicitly first.
    pub fn find_first<F>(&self, predicate: &F) -> Option<&Node>
    where
        F: Fn(&Node) -> bool,
    {
        for child in &self.children {
            if let Value::Node(node) = child {
                if predicate(node) {
                    return Some(node);
                }
                if let Some(found) = node.find_first(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Mutable twin of [`find_first`], identical traversal order
    pub fn find_first_mut<F>(&mut self, predicate: &F) -> Option<&mut Node>
    where
        F: Fn(&Node) -> bool,
    {
        for child in self.children.iter_mut() {
            if let Value::Node(node) = child {
                if predicate(node) {
                    return Some(node);
                }
                if let Some(found) = node.find_first_mut(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// First descendant labeled `name`, in document order
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.find_first(&|node: &Node| node.name == name)
    }

    /// Mutable twin of [`find_by_name`]
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.find_first_mut(&|node: &Node| node.name == name)
    }

    /// Every node labeled `name` in this subtree, document order
    ///
    /// Includes the receiver itself when it matches. A matched node
    /// contributes itself only; its own subtree is not searched for
    /// further matches.
    pub fn find_all_by_name<'a>(&'a self, name: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.collect_by_name(name, &mut found);
        found
    }

    fn collect_by_name<'a>(&'a self, name: &str, found: &mut Vec<&'a Node>) {
        if self.name == name {
            found.push(self);
            return;
        }
        for child in &self.children {
            if let Value::Node(node) = child {
                node.collect_by_name(name, found);
            }
        }
    }

    /// Mutable twin of [`find_all_by_name`]
    pub fn find_all_by_name_mut<'a>(&'a mut self, name: &str) -> Vec<&'a mut Node> {
        let mut found = Vec::new();
        self.collect_by_name_mut(name, &mut found);
        found
    }

    fn collect_by_name_mut<'a>(&'a mut self, name: &str, found: &mut Vec<&'a mut Node>) {
        if self.name == name {
            found.push(self);
            return;
        }
        for child in self.children.iter_mut() {
            if let Value::Node(node) = child {
                node.collect_by_name_mut(name, found);
            }
        }
    }
}
