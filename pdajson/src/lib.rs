// SPDX-License-Identifier: Apache-2.0

//! A non-validating, zero-copy JSON reader.
//!
//! Input bytes are split into tokens by [`Tokenizer`], matched against the
//! JSON grammar by [`SaxParser`], and reported as [`SaxEvent`]s to a
//! [`SaxReceiver`]. [`TreeBuilder`] is a receiver that links the events
//! into a tree of nodes held in a fixed-capacity arena. Every payload is a
//! slice of the caller's buffer; nothing is unescaped or converted.
//!
//! ```
//! use pdajson::{parse_tree, to_json_string, NodeType};
//!
//! let input = br#"{ "name": "pda", "tags": [1, 2] }"#;
//! let tree = parse_tree(input, 32).unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(root.kind(), NodeType::Object);
//! assert_eq!(root.get("name").unwrap().data(), b"pda");
//! assert_eq!(to_json_string(root), br#"{"name":"pda","tags":[1,2]}"#);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod arena;
pub use arena::{Arena, NodeId};

mod char_class;
pub use char_class::{classify, CharClass};

mod dump;
pub use dump::{dump, Dump};

mod node;
pub use node::{Node, NodeRef, NodeType, Siblings};

mod options;
pub use options::ParserOptions;

mod parse_error;
pub use parse_error::ParseError;

mod rebuild;
pub use rebuild::{to_json_string, write_json, SaxStringBuilder};

mod receiver;
pub use receiver::{SaxEvent, SaxReceiver};

mod sax_parser;
pub use sax_parser::SaxParser;

mod tokenizer;
pub use tokenizer::{Token, TokenType, Tokenizer};

mod tree_builder;
pub use tree_builder::TreeBuilder;

/// Parses `input` into a tree of at most `capacity` nodes.
///
/// Fails with [`ParseError::Rejected`] when the tree needs more nodes.
pub fn parse_tree(input: &[u8], capacity: usize) -> Result<TreeBuilder<'_>, ParseError> {
    let mut parser = SaxParser::new(TreeBuilder::with_capacity(capacity));
    parser.parse(input)?;
    Ok(parser.into_receiver())
}
