//! Undo support.
//!
//! The move engine pushes one `MoveRecord` per committed transfer; undo
//! pops it and reverses the transfer. Draws and recycles are not recorded.

pub mod undo;

pub use undo::UndoHistory;
