// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity bump arena addressed by index.

use alloc::vec::Vec;
use core::ops::Index;

/// Index of a slot in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The first slot, where a tree's root lives.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the slot in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A pool of `T` slots with a capacity fixed at construction.
///
/// Slots are handed out in order and never freed one by one. [`clear`]
/// rewinds the cursor so the whole pool is reused; the backing storage is
/// allocated once and released on drop.
///
/// [`clear`]: Arena::clear
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> Arena<T> {
    /// Creates an arena able to hold `capacity` values.
    ///
    /// Capacity beyond `u32::MAX + 1` slots is unreachable since ids are 32 bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores `value` in the next free slot, or returns `None` when full.
    pub fn alloc(&mut self, value: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let id = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(value);
        Some(NodeId(id))
    }

    /// The value in slot `id`, if that slot is in use.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.index())
    }

    /// The value in slot `id`, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.index())
    }

    /// Rewinds the cursor to zero. Storage is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of slots in use.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots in allocation order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.slots.iter()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.slots[id.index()]
    }
}
