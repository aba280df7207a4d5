//! Outbound event types.
//!
//! - `GameEvent`: what the engine queues after each committed mutation

pub mod event;

pub use event::GameEvent;
