//! Score deltas per move type.
//!
//! Source and destination are scored independently, so a Tableau →
//! Foundation move earns both the foundation and the tableau bonus.

use crate::core::PileRole;

/// Any move onto a foundation.
pub const TO_FOUNDATION: i32 = 10;

/// Any move out of a tableau column.
pub const FROM_TABLEAU: i32 = 5;

/// Any move off a foundation.
pub const FROM_FOUNDATION: i32 = -15;

/// One-time bonus for completing all foundations.
pub const WIN_BONUS: i32 = 100;

/// Score change for a committed move from `source` to `target`.
#[must_use]
pub fn move_delta(source: PileRole, target: PileRole) -> i32 {
    let mut delta = 0;
    if target == PileRole::Foundation {
        delta += TO_FOUNDATION;
    }
    match source {
        PileRole::Tableau => delta += FROM_TABLEAU,
        PileRole::Foundation => delta += FROM_FOUNDATION,
        PileRole::Stock | PileRole::Waste => {}
    }
    delta
}
