// SPDX-License-Identifier: Apache-2.0

//! Receiver that builds an immutable tree inside a fixed-capacity arena.

use alloc::vec::Vec;

use crate::arena::{Arena, NodeId};
use crate::node::{Node, NodeRef, NodeType};
use crate::receiver::{SaxEvent, SaxReceiver};

use log::{debug, warn};

/// Builds a first-child / next-sibling tree from parser events.
///
/// All nodes come from a pool sized at construction; nothing is allocated
/// per node. Running out of slots does not abort the parse. The builder
/// stops allocating, remembers the rejection, and reports failure from
/// `document_stop`, so nodes that were already linked are never touched.
///
/// ```
/// use pdajson::{NodeType, SaxParser, TreeBuilder};
///
/// let mut parser = SaxParser::new(TreeBuilder::with_capacity(16));
/// parser.parse(br#"{"k": "v"}"#).unwrap();
///
/// let tree = parser.receiver();
/// let root = tree.root().unwrap();
/// assert_eq!(root.kind(), NodeType::Object);
/// let key = root.value().unwrap();
/// assert_eq!(key.data(), b"k");
/// assert_eq!(key.value().unwrap().data(), b"v");
/// ```
#[derive(Debug)]
pub struct TreeBuilder<'input> {
    pool: Arena<Node<'input>>,
    /// Last linked node of every open scope; `None` until the scope has a child.
    scopes: Vec<Option<NodeId>>,
    root: Option<NodeId>,
    allocation_rejected: bool,
}

impl<'input> TreeBuilder<'input> {
    /// Creates a builder whose trees may hold at most `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: Arena::with_capacity(capacity),
            scopes: Vec::new(),
            root: None,
            allocation_rejected: false,
        }
    }

    /// Root of the last successfully built tree.
    pub fn root(&self) -> Option<NodeRef<'_, 'input>> {
        self.root.and_then(|id| NodeRef::new(&self.pool, id))
    }

    /// Looks up any node of the current tree by id.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, 'input>> {
        self.root?;
        NodeRef::new(&self.pool, id)
    }

    /// True if the last parse ran out of node slots.
    pub fn is_allocation_rejected(&self) -> bool {
        self.allocation_rejected
    }

    /// Number of nodes allocated by the last parse.
    pub fn node_count(&self) -> usize {
        self.pool.len()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Forgets the current tree and rewinds the pool.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.scopes.clear();
        self.scopes.push(None);
        self.root = None;
        self.allocation_rejected = false;
    }

    fn append(&mut self, kind: NodeType, data: &'input [u8]) {
        let Some(id) = self.pool.alloc(Node::leaf(kind, data)) else {
            if !self.allocation_rejected {
                warn!("node pool exhausted at {} nodes", self.pool.capacity());
            }
            self.allocation_rejected = true;
            return;
        };
        self.link(id);
    }

    /// Links `id` as first child of the enclosing scope's node or as next
    /// sibling of the scope's last node.
    fn link(&mut self, id: NodeId) {
        let depth = self.scopes.len();
        let Some(last) = self.scopes.last_mut() else {
            return;
        };
        match last.replace(id) {
            Some(previous) => {
                if let Some(node) = self.pool.get_mut(previous) {
                    node.next = Some(id);
                }
            }
            None if depth > 1 => {
                let parent = self.scopes[depth - 2];
                if let Some(node) = parent.and_then(|parent| self.pool.get_mut(parent)) {
                    node.value = Some(id);
                }
            }
            None => {}
        }
    }

    fn open_scope(&mut self) {
        self.scopes.push(None);
    }

    fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }
}

/// Strips the surrounding quotes of a string token.
fn unquote(data: &[u8]) -> &[u8] {
    match data {
        [b'"', inner @ .., b'"'] => inner,
        _ => data,
    }
}

impl<'input> SaxReceiver<'input> for TreeBuilder<'input> {
    fn document_start(&mut self) {
        self.reset();
    }

    fn document_stop(&mut self) -> bool {
        if self.pool.is_empty() || self.allocation_rejected {
            debug!(
                "tree rejected: {} nodes, pool exhausted: {}",
                self.pool.len(),
                self.allocation_rejected
            );
            return false;
        }
        self.root = Some(NodeId::ROOT);
        debug!("tree built: {} nodes", self.pool.len());
        true
    }

    fn document_failure(&mut self) {}

    fn sax_event(&mut self, event: SaxEvent, data: &'input [u8]) {
        match event {
            SaxEvent::ObjectStart => {
                self.append(NodeType::Object, data);
                self.open_scope();
            }
            SaxEvent::ArrayStart => {
                self.append(NodeType::Array, data);
                self.open_scope();
            }
            SaxEvent::ObjectItemStart => {
                self.append(NodeType::Key, unquote(data));
                self.open_scope();
            }
            SaxEvent::ObjectStop | SaxEvent::ArrayStop | SaxEvent::ObjectItemStop => {
                self.close_scope();
            }
            SaxEvent::String => self.append(NodeType::String, unquote(data)),
            SaxEvent::Number => self.append(NodeType::Number, data),
            SaxEvent::Null => self.append(NodeType::Null, data),
            SaxEvent::Bool => {
                let kind = if data.first() == Some(&b't') {
                    NodeType::True
                } else {
                    NodeType::False
                };
                self.append(kind, data);
            }
            SaxEvent::ValueSeparator => {}
        }
    }
}
