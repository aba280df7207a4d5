//! The table: all piles and where every card lies.
//!
//! ## Key Types
//!
//! - `Pile`, `PileId`, `PileRole`: a single pile (from `core::pile`)
//! - `PileSet`: all thirteen piles plus the card location index

pub mod manager;

pub use manager::PileSet;

// Re-export pile types from core for convenience
pub use crate::core::pile::{Pile, PileId, PileRole};
