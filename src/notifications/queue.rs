// SPDX-License-Identifier: MPL-2.0
//! Pending notices, in display order.

use super::notice::Notice;
use std::collections::VecDeque;

/// Unbounded FIFO of notices waiting for the surface.
///
/// Notices are never reordered or deduplicated.
#[derive(Debug, Default)]
pub struct Queue {
    pending: VecDeque<Notice>,
}

impl Queue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notice at the tail.
    pub fn push(&mut self, notice: Notice) {
        self.pending.push_back(notice);
    }

    /// Removes and returns the notice at the head, if any.
    pub fn pop(&mut self) -> Option<Notice> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates pending notices, next to be shown first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.pending.iter()
    }

    /// Drops every pending notice. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}
