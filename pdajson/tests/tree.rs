// SPDX-License-Identifier: Apache-2.0

use pdajson::{dump, parse_tree, Dump, NodeType, ParseError, SaxParser, TreeBuilder};
use test_log::test;

const DOC: &[u8] = br#"{"a":[1,2,true,null]}"#;
// object, key, array and four leaves
const DOC_NODES: usize = 7;

#[test]
fn test_pool_sized_exactly() {
    let tree = parse_tree(DOC, DOC_NODES).unwrap();
    assert_eq!(tree.node_count(), DOC_NODES);
    assert!(!tree.is_allocation_rejected());
}

#[test]
fn test_pool_one_short() {
    let mut parser = SaxParser::new(TreeBuilder::with_capacity(DOC_NODES - 1));
    assert_eq!(parser.parse(DOC), Err(ParseError::Rejected));
    assert!(parser.error().starts_with("document rejected by receiver"));

    let tree = parser.receiver();
    assert!(tree.is_allocation_rejected());
    assert!(tree.root().is_none());
    assert_eq!(tree.node_count(), DOC_NODES - 1);
}

#[test]
fn test_leaf_payloads() {
    let input = br#"{"s":"x\"","n":-0.25,"t":true,"f":false,"z":null}"#;
    // the escaped quote ends the string token early, so keep escapes out
    assert!(parse_tree(input, 32).is_err());

    let input = br#"{"s":"x y","n":-0.25,"t":true,"f":false,"z":null}"#;
    let tree = parse_tree(input, 32).unwrap();
    let root = tree.root().unwrap();

    let expect = [
        ("s", NodeType::String, &b"x y"[..]),
        ("n", NodeType::Number, &b"-0.25"[..]),
        ("t", NodeType::True, &b"true"[..]),
        ("f", NodeType::False, &b"false"[..]),
        ("z", NodeType::Null, &b"null"[..]),
    ];
    for (key, kind, data) in expect {
        let value = root.get(key).unwrap();
        assert_eq!(value.kind(), kind, "{key}");
        assert_eq!(value.data(), data, "{key}");
        assert!(value.is_leaf());
    }
}

#[test]
fn test_payloads_borrow_input() {
    let input = br#"["abc"]"#.to_vec();
    let tree = parse_tree(&input, 4).unwrap();
    let leaf = tree.root().unwrap().value().unwrap();
    let range = input.as_ptr_range();
    assert!(range.contains(&leaf.data().as_ptr()));
}

#[test]
fn test_children_iterate_in_order() {
    let tree = parse_tree(b"[[1],[2,3],[]]", 16).unwrap();
    let lens: Vec<usize> = tree
        .root()
        .unwrap()
        .children()
        .map(|child| child.children().count())
        .collect();
    assert_eq!(lens, [1, 2, 0]);
}

#[test]
fn test_deep_nesting_builds_chain() {
    let depth = 10_000;
    let mut input = Vec::new();
    input.extend(std::iter::repeat(b'[').take(depth));
    input.extend(std::iter::repeat(b']').take(depth));

    let tree = parse_tree(&input, depth).unwrap();
    let mut node = tree.root().unwrap();
    let mut levels = 1;
    while let Some(child) = node.value() {
        assert_eq!(child.kind(), NodeType::Array);
        assert!(child.next().is_none());
        node = child;
        levels += 1;
    }
    assert_eq!(levels, depth);

    let mut text = String::new();
    dump(&mut text, tree.root().unwrap()).unwrap();
    assert_eq!(text.lines().count(), depth);
}

#[test]
fn test_builder_reused_across_documents() {
    let mut parser = SaxParser::new(TreeBuilder::with_capacity(8));
    parser.parse(b"[1,2,3]").unwrap();
    assert_eq!(parser.receiver().node_count(), 4);

    parser.parse(br#"{"k":"v"}"#).unwrap();
    let tree = parser.receiver();
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.root().unwrap().get("k").unwrap().data(), b"v");
}

#[test]
fn test_same_buffer_same_tree() {
    let input = br#"{"a":[1,{"b":null}],"c":"d"}"#;
    let mut parser = SaxParser::new(TreeBuilder::with_capacity(16));

    parser.parse(input).unwrap();
    let first = Dump(parser.receiver().root().unwrap()).to_string();
    let count = parser.receiver().node_count();

    parser.parse(input).unwrap();
    let second = Dump(parser.receiver().root().unwrap()).to_string();
    assert_eq!(first, second);
    assert_eq!(parser.receiver().node_count(), count);
}
