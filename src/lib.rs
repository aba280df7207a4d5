//! # klondike-engine
//!
//! A headless Klondike solitaire engine: dealing, move validation, scoring,
//! undo and win detection, plus the pieces a UI host needs around them.
//!
//! ## Design Principles
//!
//! 1. **All or nothing**: every request is either applied in full or
//!    rejected with no change. Validation runs before any mutation.
//!
//! 2. **No hidden state**: no singletons, timers or I/O in the engine.
//!    Hosts own a `Solitaire` and drain its event queue.
//!
//! 3. **Deterministic**: the same seed deals the same games, and a restart
//!    replays the same deal and the same recycle shuffles.
//!
//! ## Modules
//!
//! - `core`: cards, piles, actions, session state, RNG, configuration
//! - `piles`: the table and the card location index
//! - `rules`: dealing, scoring and the `Solitaire` move engine
//! - `history`: bounded undo history
//! - `events`: events the engine queues for the host
//! - `targeting`: drop-target resolution for drag gestures
//! - `host`: JSON message bridge and play-time clock

pub mod core;
pub mod piles;
pub mod rules;
pub mod history;
pub mod events;
pub mod targeting;
pub mod host;

// Re-export commonly used types
pub use crate::core::{
    Action, Card, CardId, Color, GameConfig, GameRng, PileId, PileRole, Rank, Snapshot, Suit,
};

pub use crate::piles::PileSet;

pub use crate::rules::{DrawOutcome, LayoutError, MoveError, Solitaire};

pub use crate::history::UndoHistory;

pub use crate::events::GameEvent;

pub use crate::targeting::{resolve_drop_target, DragGesture, DropTarget, PileGeometry, Point, Rect, TableLayout};

pub use crate::host::{Bridge, BridgeError, Clock, EventSink, ManualClock, OutboundMessage, SystemClock};
