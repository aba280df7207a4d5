//! Klondike rules.
//!
//! - `deal`: shuffle and lay out a new game
//! - `scoring`: score deltas per move
//! - `engine`: the `Solitaire` session that validates and commits moves
//!
//! The engine is the only thing that mutates a table during play. Hosts
//! call into it and read the results back through queries and events.

pub mod deal;
pub mod engine;
pub mod error;
pub mod scoring;

pub use engine::{DrawOutcome, Solitaire};
pub use error::{LayoutError, MoveError};
