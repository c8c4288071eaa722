//! 32-bit LIFO stack.
//!
//! Cells are `u32`, so every pushed value is already reduced modulo 2^32.
//! Signed views are computed by callers and never stored.

/// A growable stack of 32-bit cells; the top is the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    cells: Vec<u32>,
}

impl Stack {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Pushes a value onto the top.
    #[inline]
    pub fn push(&mut self, val: u32) {
        self.cells.push(val);
    }

    /// Removes and returns the top value, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<u32> {
        self.cells.pop()
    }

    /// Returns the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<u32> {
        self.cells.last().copied()
    }

    /// Returns the value `depth` cells below the top (`0` is the top).
    #[inline]
    pub fn peek_at(&self, depth: usize) -> Option<u32> {
        let idx = self.cells.len().checked_sub(depth + 1)?;
        self.cells.get(idx).copied()
    }

    /// Number of values on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the stack holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stack depth as a 32-bit cell, wrapping like any other pushed value.
    #[inline]
    pub fn depth_cell(&self) -> u32 {
        self.cells.len() as u32
    }

    /// Contents from bottom to top.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }
}

impl From<Vec<u32>> for Stack {
    fn from(cells: Vec<u32>) -> Self {
        Self { cells }
    }
}
