//! Bounded undo history.
//!
//! A LIFO of `MoveRecord`s with a fixed capacity. Pushing onto a full
//! history silently evicts the oldest record, so only the most recent
//! `capacity` moves can ever be undone.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::MoveRecord;

/// Bounded stack of committed moves.
///
/// ## Behavior
///
/// - `push()`: Records a move, evicting the oldest when full
/// - `pop()`: Takes the most recent move
/// - `clear()`: Forgets everything (new game, restart)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UndoHistory {
    /// Oldest at the front, newest at the back.
    records: VecDeque<MoveRecord>,
    capacity: usize,
}

impl UndoHistory {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A zero capacity is raised to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a move. Returns the evicted record, if any.
    pub fn push(&mut self, record: MoveRecord) -> Option<MoveRecord> {
        let evicted = if self.records.len() >= self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Take the most recent record.
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop_back()
    }

    /// The most recent record.
    #[must_use]
    pub fn peek(&self) -> Option<&MoveRecord> {
        self.records.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(10)
    }
}
