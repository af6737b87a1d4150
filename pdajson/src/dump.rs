// SPDX-License-Identifier: Apache-2.0

//! Indented, line-per-node listing of a tree for debugging.
//!
//! ```text
//! [0] object
//!   [1] key 'a'
//!     [2] array
//!       [3] number '1'
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::node::{NodeRef, NodeType};

/// Writes `root`, its descendants and its siblings to `out`, one node per line.
pub fn dump<W: fmt::Write>(out: &mut W, root: NodeRef<'_, '_>) -> fmt::Result {
    // (node, level); siblings are pushed before children so that children
    // come out first
    let mut pending = Vec::new();
    pending.push((root, 0usize));

    while let Some((node, level)) = pending.pop() {
        write!(out, "{:indent$}[{}] {}", "", level, node.kind().name(), indent = level * 2)?;
        if matches!(node.kind(), NodeType::Key | NodeType::String | NodeType::Number) {
            out.write_str(" '")?;
            for chunk in node.data().utf8_chunks() {
                out.write_str(chunk.valid())?;
                for byte in chunk.invalid() {
                    write!(out, "\\x{byte:02x}")?;
                }
            }
            out.write_char('\'')?;
        }
        out.write_char('\n')?;

        if let Some(next) = node.next() {
            pending.push((next, level));
        }
        if let Some(child) = node.value() {
            pending.push((child, level + 1));
        }
    }
    Ok(())
}

/// [`Display`](fmt::Display) adapter around [`dump`].
#[derive(Clone, Copy)]
pub struct Dump<'tree, 'input>(pub NodeRef<'tree, 'input>);

impl fmt::Display for Dump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump(f, self.0)
    }
}
