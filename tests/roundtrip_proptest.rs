//! Round-trip property for the parse/serialize pair
//!
//! Serialized trees are already whitespace-normalized text, so parsing
//! and re-serializing them must be the identity. Trees are generated from
//! the model side; atoms are drawn from the shapes the lexical rules
//! accept.

use cubesym::sexpr::{parse, serialize, Node, Value};
use proptest::prelude::*;

const NAME_PATTERN: &str = "[a-z][a-z0-9_]{0,8}";

fn atom() -> impl Strategy<Value = Value> {
    prop_oneof![
        NAME_PATTERN.prop_map(Value::Raw),
        "-?[0-9]{1,3}(\\.[0-9]{1,2})?".prop_map(Value::Raw),
        "[ a-zA-Z0-9_.,;]{0,12}".prop_map(Value::Str),
    ]
}

fn tree_node() -> impl Strategy<Value = Node> {
    let leaf = (NAME_PATTERN, prop::collection::vec(atom(), 0..4))
        .prop_map(|(name, children)| Node::with_children(name, children));
    leaf.prop_recursive(3, 24, 4, |inner| {
        let child = prop_oneof![atom(), inner.prop_map(Value::Node)];
        (NAME_PATTERN, prop::collection::vec(child, 0..4))
            .prop_map(|(name, children)| Node::with_children(name, children))
    })
}

proptest! {
    #[test]
    fn serialized_trees_reparse_identically(node in tree_node()) {
        let text = serialize(&node);
        let tree = parse(&text).unwrap();
        prop_assert_eq!(tree.children.len(), 1);
        let reparsed = tree.children[0].as_node().unwrap();
        prop_assert_eq!(reparsed, &node);
        prop_assert_eq!(serialize(reparsed), text);
    }
}

#[test]
fn whitespace_runs_collapse_to_single_spaces() {
    let source = "(pin  input\n\t(name   \"NRST\")\n  (number \"4\"))";
    let tree = parse(source).unwrap();
    let pin = tree.children[0].as_node().unwrap();
    assert_eq!(
        serialize(pin),
        "(pin input (name \"NRST\") (number \"4\"))"
    );
}

#[test]
fn number_spelling_survives_the_full_pipeline() {
    let tree = parse("(at -12.50)").unwrap();
    assert_eq!(serialize(tree.children[0].as_node().unwrap()), "(at -12.50)");
}
