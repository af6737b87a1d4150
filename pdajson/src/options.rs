// SPDX-License-Identifier: Apache-2.0

/// Tuning knobs for [`SaxParser`](crate::SaxParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How many bytes of unconsumed input a failure message quotes before
    /// cutting it off with `...`.
    ///
    /// # Default
    ///
    /// `10`
    pub error_preview_limit: usize,

    /// Initial capacity of the grammar state stack. The stack grows past it
    /// as needed; this only avoids early reallocations for nested input.
    ///
    /// # Default
    ///
    /// `32`
    pub initial_stack_capacity: usize,
}

impl ParserOptions {
    /// Sets [`error_preview_limit`](Self::error_preview_limit).
    pub fn with_error_preview_limit(mut self, limit: usize) -> Self {
        self.error_preview_limit = limit;
        self
    }

    /// Sets [`initial_stack_capacity`](Self::initial_stack_capacity).
    pub fn with_initial_stack_capacity(mut self, capacity: usize) -> Self {
        self.initial_stack_capacity = capacity;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            error_preview_limit: 10,
            initial_stack_capacity: 32,
        }
    }
}
