// SPDX-License-Identifier: Apache-2.0

//! Tree nodes in first-child / next-sibling form.
//!
//! Objects and arrays point at their first child with `value`; children are
//! chained through `next`. Object children are always [`NodeType::Key`]
//! nodes, and a key's `value` is the member's value.

use crate::arena::{Arena, NodeId};

/// What a [`Node`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Object,
    Array,
    String,
    Number,
    True,
    False,
    Null,
    /// An object member name; its `value` is the member value.
    Key,
}

impl NodeType {
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::String => "string",
            NodeType::Number => "number",
            NodeType::True => "true",
            NodeType::False => "false",
            NodeType::Null => "null",
            NodeType::Key => "key",
        }
    }
}

/// One arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'input> {
    /// First child of an object or array, or the value of a key.
    pub value: Option<NodeId>,
    /// Next sibling in the enclosing container.
    pub next: Option<NodeId>,
    /// Payload borrowed from the input. Quotes are stripped from strings and
    /// keys; other kinds hold their literal token bytes.
    pub data: &'input [u8],
    pub kind: NodeType,
}

impl<'input> Node<'input> {
    pub(crate) fn leaf(kind: NodeType, data: &'input [u8]) -> Self {
        Node {
            value: None,
            next: None,
            data,
            kind,
        }
    }
}

/// A read-only handle on a node and the arena it lives in.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'tree, 'input> {
    arena: &'tree Arena<Node<'input>>,
    id: NodeId,
    node: &'tree Node<'input>,
}

impl<'tree, 'input> NodeRef<'tree, 'input> {
    pub(crate) fn new(arena: &'tree Arena<Node<'input>>, id: NodeId) -> Option<Self> {
        arena.get(id).map(|node| NodeRef { arena, id, node })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'tree Node<'input> {
        self.node
    }

    pub fn kind(&self) -> NodeType {
        self.node.kind
    }

    pub fn data(&self) -> &'input [u8] {
        self.node.data
    }

    /// [`data`](Self::data) as text, `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&'input str> {
        core::str::from_utf8(self.node.data).ok()
    }

    /// First child of a container, or the value of a key.
    pub fn value(&self) -> Option<Self> {
        self.node.value.and_then(|id| Self::new(self.arena, id))
    }

    /// Next sibling.
    pub fn next(&self) -> Option<Self> {
        self.node.next.and_then(|id| Self::new(self.arena, id))
    }

    /// Iterates over the children of a container, or the value of a key.
    pub fn children(&self) -> Siblings<'tree, 'input> {
        Siblings {
            current: self.value(),
        }
    }

    /// Value of the first member named `key`, for object nodes.
    pub fn get(&self, key: &str) -> Option<Self> {
        if self.kind() != NodeType::Object {
            return None;
        }
        self.children()
            .find(|member| member.data() == key.as_bytes())
            .and_then(|member| member.value())
    }

    pub fn is_leaf(&self) -> bool {
        self.node.value.is_none()
    }
}

impl PartialEq for NodeRef<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

/// Iterator over a chain of siblings.
#[derive(Debug, Clone)]
pub struct Siblings<'tree, 'input> {
    current: Option<NodeRef<'tree, 'input>>,
}

impl<'tree, 'input> Iterator for Siblings<'tree, 'input> {
    type Item = NodeRef<'tree, 'input>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.next();
        Some(current)
    }
}
