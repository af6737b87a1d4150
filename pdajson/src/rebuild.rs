// SPDX-License-Identifier: Apache-2.0

//! Rebuilding compact JSON text, either straight from parser events or from
//! a built tree. Both reproduce compact input byte for byte.

use alloc::vec::Vec;

use crate::node::{NodeRef, NodeType};
use crate::receiver::{SaxEvent, SaxReceiver};

/// Receiver that echoes events back into JSON text.
#[derive(Debug, Default)]
pub struct SaxStringBuilder {
    output: Vec<u8>,
}

impl SaxStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text rebuilt by the last parse.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Takes the rebuilt text, leaving the builder empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.output)
    }

    pub fn reset(&mut self) {
        self.output.clear();
    }
}

impl SaxReceiver<'_> for SaxStringBuilder {
    fn document_start(&mut self) {
        self.reset();
    }

    fn document_stop(&mut self) -> bool {
        true
    }

    fn document_failure(&mut self) {}

    fn sax_event(&mut self, event: SaxEvent, data: &[u8]) {
        match event {
            SaxEvent::ObjectStart
            | SaxEvent::ObjectStop
            | SaxEvent::ArrayStart
            | SaxEvent::ArrayStop
            | SaxEvent::ValueSeparator => {
                self.output.extend_from_slice(&data[..1.min(data.len())]);
            }
            SaxEvent::String | SaxEvent::Number | SaxEvent::Null | SaxEvent::Bool => {
                self.output.extend_from_slice(data);
            }
            SaxEvent::ObjectItemStart => {
                self.output.extend_from_slice(data);
                self.output.push(b':');
            }
            SaxEvent::ObjectItemStop => {}
        }
    }
}

/// Pending work while walking a tree without recursion.
enum Step<'tree, 'input> {
    Chain(NodeRef<'tree, 'input>),
    Byte(u8),
}

/// Appends the JSON text of `root` and its siblings to `out`.
///
/// The walk keeps its own stack, so depth is bounded by memory only.
pub fn write_json(root: NodeRef<'_, '_>, out: &mut Vec<u8>) {
    let mut pending = Vec::new();
    pending.push(Step::Chain(root));

    while let Some(step) = pending.pop() {
        let node = match step {
            Step::Byte(byte) => {
                out.push(byte);
                continue;
            }
            Step::Chain(node) => node,
        };

        // resume with the sibling once this node is fully written
        if let Some(next) = node.next() {
            pending.push(Step::Chain(next));
            pending.push(Step::Byte(b','));
        }

        match node.kind() {
            NodeType::Object | NodeType::Array => {
                let (open, close) = if node.kind() == NodeType::Object {
                    (b'{', b'}')
                } else {
                    (b'[', b']')
                };
                out.push(open);
                pending.push(Step::Byte(close));
                if let Some(child) = node.value() {
                    pending.push(Step::Chain(child));
                }
            }
            NodeType::Key => {
                quoted(node.data(), out);
                out.push(b':');
                if let Some(value) = node.value() {
                    pending.push(Step::Chain(value));
                }
            }
            NodeType::String => quoted(node.data(), out),
            NodeType::Number | NodeType::True | NodeType::False | NodeType::Null => {
                out.extend_from_slice(node.data());
            }
        }
    }
}

/// JSON text of the tree rooted at `root`.
pub fn to_json_string(root: NodeRef<'_, '_>) -> Vec<u8> {
    let mut out = Vec::new();
    write_json(root, &mut out);
    out
}

fn quoted(data: &[u8], out: &mut Vec<u8>) {
    out.push(b'"');
    out.extend_from_slice(data);
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SaxParser, TreeBuilder};
    use test_log::test;

    fn via_events(input: &[u8]) -> Vec<u8> {
        let mut parser = SaxParser::new(SaxStringBuilder::new());
        parser.parse(input).unwrap();
        parser.into_receiver().take_output()
    }

    fn via_tree(input: &[u8]) -> Vec<u8> {
        let mut parser = SaxParser::new(TreeBuilder::with_capacity(1024));
        parser.parse(input).unwrap();
        to_json_string(parser.receiver().root().unwrap())
    }

    #[test]
    fn test_compact_input_round_trips() {
        for input in [
            &br#"{"a":[1,2,true,null]}"#[..],
            &b"[]"[..],
            &b"{}"[..],
            &b"-0.5"[..],
            &br#""text""#[..],
            &br#"[{"a":{}},[[]],"",false]"#[..],
            &br#"{"x":{"y":{"z":[1.25,-3]}},"w":null}"#[..],
        ] {
            assert_eq!(via_events(input), input);
            assert_eq!(via_tree(input), input);
        }
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let input = b" { \"a\" : [ 1 , 2 ] } ";
        let expected = br#"{"a":[1,2]}"#;
        assert_eq!(via_events(input), expected);
        assert_eq!(via_tree(input), expected);
    }

    #[test]
    fn test_escapes_are_kept_raw() {
        // string tokens end at the first quote, escaped or not
        let input = b"[\"a\\nb\",\"\xc3\xa9\"]";
        assert_eq!(via_events(input), input);
        assert_eq!(via_tree(input), input);
    }

    #[test]
    fn test_deep_tree_round_trips() {
        let depth = 10_000;
        let mut input = Vec::new();
        input.extend(core::iter::repeat(b'[').take(depth));
        input.extend(core::iter::repeat(b']').take(depth));

        let mut parser = SaxParser::new(TreeBuilder::with_capacity(depth));
        parser.parse(&input).unwrap();
        assert_eq!(to_json_string(parser.receiver().root().unwrap()), input);
    }

    #[test]
    fn test_output_reset_between_documents() {
        let mut parser = SaxParser::new(SaxStringBuilder::new());
        parser.parse(b"[1]").unwrap();
        parser.parse(b"true").unwrap();
        assert_eq!(parser.receiver().output(), b"true");
    }
}
