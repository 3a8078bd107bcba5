//! Locating and rewriting a symbol record inside a library tree
//!
//! The specialized lookups are thin predicates over the generic traversal
//! primitives, so every search shares one documented order. The rewrite
//! mutates the tree in place; the wrapper build re-packages the patched
//! record as a standalone library.

use crate::report::PinoutReport;
use crate::sexpr::parser::{parse, ParseError};
use crate::sexpr::tree::{Node, Value};
use crate::sexpr::writer::serialize;
use std::collections::HashMap;
use std::fmt;

/// Generator tag written into the output library
pub const GENERATOR: &str = "STMCube_to_KiCad";

/// Node label of a symbol record
const SYMBOL: &str = "symbol";

/// Node label of a pin sub-structure
const PIN: &str = "pin";

/// Node label of a pin's number field
const NUMBER: &str = "number";

/// Node label of a pin's display-name field
const NAME: &str = "name";

/// Errors that can occur while patching a library
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// The library text did not parse
    Parse(ParseError),
    /// No symbol record matches the MCU model
    SymbolNotFound(String),
    /// The source library carries no version field
    MissingVersion,
    /// The matched record's first child is not an identifier atom
    MalformedSymbol,
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::Parse(err) => write!(f, "{}", err),
            PatchError::SymbolNotFound(model) => {
                write!(f, "no suitable symbol was found for a {} name", model)
            }
            PatchError::MissingVersion => write!(f, "the library does not declare a version"),
            PatchError::MalformedSymbol => {
                write!(f, "the matched symbol does not carry an identifier")
            }
        }
    }
}

impl std::error::Error for PatchError {}

impl From<ParseError> for PatchError {
    fn from(err: ParseError) -> Self {
        PatchError::Parse(err)
    }
}

/// One applied pin rename
#[derive(Debug, Clone, PartialEq)]
pub struct PinRename {
    /// Pin number text
    pub number: String,
    /// Previous child slot, rendered as source text
    pub old: String,
    /// Replacement function name
    pub new: String,
}

/// Result of patching one library against a pinout report
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    /// Identifier stored in the matched symbol record
    pub symbol_id: String,
    /// Renames applied, in document order
    pub renames: Vec<PinRename>,
    /// Serialized output library
    pub content: String,
}

fn is_symbol_with_prefix(node: &Node, target: &str) -> bool {
    if node.name != SYMBOL {
        return false;
    }
    match node.children.first() {
        Some(Value::Str(id)) => id.starts_with(target),
        _ => false,
    }
}

/// First symbol record whose identifier starts with `target`, document order
pub fn symbol_by_prefix<'a>(root: &'a Node, target: &str) -> Option<&'a Node> {
    root.find_first(&|node: &Node| is_symbol_with_prefix(node, target))
}

/// Mutable twin of [`symbol_by_prefix`]
pub fn symbol_by_prefix_mut<'a>(root: &'a mut Node, target: &str) -> Option<&'a mut Node> {
    root.find_first_mut(&|node: &Node| is_symbol_with_prefix(node, target))
}

/// Rewrite the display name of every pin whose number is assigned
///
/// A pin's number is the first child of its `number` descendant; when that
/// number is a key in `assignments`, the first child slot of the pin's
/// `name` descendant is replaced in place with the mapped text as a raw
/// value. Pins missing either field are treated as not assigned and left
/// untouched. Returns the applied renames in document order.
pub fn rewrite_pins(symbol: &mut Node, assignments: &HashMap<String, String>) -> Vec<PinRename> {
    let mut renames = Vec::new();
    for pin in symbol.find_all_by_name_mut(PIN) {
        let number = match pin.find_by_name(NUMBER).and_then(Node::first_text) {
            Some(number) => number.to_string(),
            None => continue,
        };
        let new = match assignments.get(&number) {
            Some(function) => function.clone(),
            None => continue,
        };
        let name_node = match pin.find_by_name_mut(NAME) {
            Some(node) => node,
            None => continue,
        };
        let slot = match name_node.children.first_mut() {
            Some(slot) => slot,
            None => continue,
        };
        let old = slot.to_string();
        *slot = Value::Raw(new.clone());
        renames.push(PinRename { number, old, new });
    }
    renames
}

/// Wrap a patched record as a standalone library node
///
/// `version` is the value copied from the source library's own version
/// field; the generator tag is fixed.
pub fn build_library(version: Value, symbol: Node) -> Node {
    Node::with_children(
        "kicad_symbol_lib",
        vec![
            Value::Node(Node::with_children("version", vec![version])),
            Value::Node(Node::with_children(
                "generator",
                vec![Value::Str(GENERATOR.to_string())],
            )),
            Value::Node(symbol),
        ],
    )
}

/// Patch `library_source` against `report`
///
/// Parses the library, locates the symbol record matching the reported
/// model, rewrites its assigned pins in place, and re-packages the record
/// as a standalone serialized library.
pub fn patch_library(
    library_source: &str,
    report: &PinoutReport,
) -> Result<PatchOutcome, PatchError> {
    let mut tree = parse(library_source)?;
    let version = tree
        .find_by_name("version")
        .and_then(|node| node.children.first())
        .cloned()
        .ok_or(PatchError::MissingVersion)?;

    let symbol = symbol_by_prefix_mut(&mut tree, report.symbol_prefix())
        .ok_or_else(|| PatchError::SymbolNotFound(report.mcu_model.clone()))?;

    let renames = rewrite_pins(symbol, &report.pin_assignments);
    let symbol_id = match symbol.first_text() {
        Some(id) => id.to_string(),
        None => return Err(PatchError::MalformedSymbol),
    };

    let library = build_library(version, symbol.clone());
    Ok(PatchOutcome {
        symbol_id,
        renames,
        content: serialize(&library),
    })
}

/// Identifiers of every symbol record in the library, document order
pub fn list_symbols(library_source: &str) -> Result<Vec<String>, ParseError> {
    let tree = parse(library_source)?;
    let ids = tree
        .find_all_by_name(SYMBOL)
        .into_iter()
        .filter_map(Node::first_text)
        .map(str::to_string)
        .collect();
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(number: &str, name: &str) -> Value {
        Value::Node(Node::with_children(
            PIN,
            vec![
                Value::Raw("input".to_string()),
                Value::Node(Node::with_children(
                    NAME,
                    vec![
                        Value::Str(name.to_string()),
                        Value::Node(Node::new("effects")),
                    ],
                )),
                Value::Node(Node::with_children(
                    NUMBER,
                    vec![Value::Str(number.to_string())],
                )),
            ],
        ))
    }

    fn symbol(id: &str, pins: Vec<Value>) -> Node {
        let mut children = vec![Value::Str(id.to_string())];
        children.extend(pins);
        Node::with_children(SYMBOL, children)
    }

    fn assignments(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(number, name)| (number.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_symbol_by_prefix_takes_the_first_match() {
        let root = Node::with_children(
            "a",
            vec![
                Value::Node(symbol("STM8S003F3", vec![])),
                Value::Node(symbol("STM8S003K3", vec![])),
            ],
        );
        let found = symbol_by_prefix(&root, "STM8S003F").unwrap();
        assert_eq!(found.first_text(), Some("STM8S003F3"));
        // Both records match the shorter prefix; document order still wins.
        let found = symbol_by_prefix(&root, "STM8S003").unwrap();
        assert_eq!(found.first_text(), Some("STM8S003F3"));
    }

    #[test]
    fn test_symbol_by_prefix_absence_is_none() {
        let root = Node::with_children("a", vec![Value::Node(symbol("STM8S003F3", vec![]))]);
        assert!(symbol_by_prefix(&root, "NOPE").is_none());
    }

    #[test]
    fn test_symbol_without_string_identifier_never_matches() {
        let mut bare = Node::new(SYMBOL);
        bare.children.push(Value::Raw("STM8S003F3".to_string()));
        let root = Node::with_children("a", vec![Value::Node(bare)]);
        assert!(symbol_by_prefix(&root, "STM8").is_none());
    }

    #[test]
    fn test_rewrite_changes_only_assigned_pins() {
        let mut record = symbol("U", vec![pin("1", "PA1"), pin("2", "PA2"), pin("3", "PA3")]);
        let before = record.clone();
        let renames = rewrite_pins(&mut record, &assignments(&[("2", "RESET")]));

        assert_eq!(
            renames,
            vec![PinRename {
                number: "2".to_string(),
                old: "\"PA2\"".to_string(),
                new: "RESET".to_string(),
            }]
        );
        // Pin 2 now carries the raw replacement.
        let pins = record.find_all_by_name(PIN);
        assert_eq!(
            pins[1].find_by_name(NAME).unwrap().children[0],
            Value::Raw("RESET".to_string())
        );
        // Pins 1 and 3 are untouched.
        let before_pins = before.find_all_by_name(PIN);
        assert_eq!(pins[0], before_pins[0]);
        assert_eq!(pins[2], before_pins[2]);
    }

    #[test]
    fn test_rewrite_skips_pin_without_number() {
        let mut record = symbol("U", vec![]);
        record.children.push(Value::Node(Node::with_children(
            PIN,
            vec![Value::Node(Node::with_children(
                NAME,
                vec![Value::Str("PA1".to_string())],
            ))],
        )));
        let renames = rewrite_pins(&mut record, &assignments(&[("1", "RESET")]));
        assert!(renames.is_empty());
    }

    #[test]
    fn test_rewrite_skips_assigned_pin_without_name_field() {
        let mut record = symbol("U", vec![]);
        record.children.push(Value::Node(Node::with_children(
            PIN,
            vec![Value::Node(Node::with_children(
                NUMBER,
                vec![Value::Str("1".to_string())],
            ))],
        )));
        let renames = rewrite_pins(&mut record, &assignments(&[("1", "RESET")]));
        assert!(renames.is_empty());
    }

    #[test]
    fn test_rewrite_reports_renames_in_document_order() {
        let mut record = symbol("U", vec![pin("1", "PA1"), pin("2", "PA2")]);
        let renames = rewrite_pins(
            &mut record,
            &assignments(&[("2", "UART_TX"), ("1", "RESET")]),
        );
        let numbers: Vec<_> = renames.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_build_library_shape() {
        let library = build_library(
            Value::Raw("20211014".to_string()),
            symbol("STM8S003F3", vec![]),
        );
        assert_eq!(
            serialize(&library),
            "(kicad_symbol_lib (version 20211014) (generator \"STMCube_to_KiCad\") \
             (symbol \"STM8S003F3\"))"
        );
    }
}
