//! Host integration.
//!
//! - `bridge`: JSON messages in, outbound messages with play time out
//! - `clock`: time sources and the play-time stopwatch

pub mod bridge;
pub mod clock;

pub use bridge::{Bridge, BridgeError, EndPayload, EventSink, OutboundMessage, StatePayload};
pub use clock::{format_clock, Clock, ManualClock, Stopwatch, SystemClock};
