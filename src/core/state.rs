//! Session counters and the public snapshot.
//!
//! ## Session
//!
//! Score, move count and the win flag. These are the only numbers undo
//! restores by snapshot rather than by replaying deltas.
//!
//! ## Snapshot
//!
//! A pure, serializable view of the session for hosts that refresh their
//! UI on their own cadence.

use serde::{Deserialize, Serialize};

use crate::core::pile::FOUNDATION_COUNT;

/// Mutable session counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current score. Can go negative after foundation withdrawals.
    pub score: i32,

    /// Committed moves and draws.
    pub move_count: u32,

    /// Has every foundation been completed?
    pub won: bool,
}

impl Session {
    /// Fresh counters for a new deal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Observable state of a game at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub score: i32,
    pub move_count: u32,
    pub won: bool,

    /// Records available to undo.
    pub undo_depth: usize,

    pub stock_count: usize,
    pub waste_count: usize,

    /// Cards on each foundation, in suit order.
    pub foundation_counts: [usize; FOUNDATION_COUNT],
}

impl Snapshot {
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_depth > 0
    }
}
