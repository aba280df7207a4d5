//! Events emitted by the engine.
//!
//! The engine queues an event after every committed mutation. Hosts drain
//! the queue (see `Solitaire::drain_events`) and decide how to present
//! them; the host bridge turns them into outbound messages with elapsed
//! time attached.

use serde::{Deserialize, Serialize};

/// Something observable happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Score, move count or pile contents changed.
    #[serde(rename_all = "camelCase")]
    StateChanged { score: i32, move_count: u32 },

    /// Every foundation is complete. Fired once per win.
    #[serde(rename_all = "camelCase")]
    GameEnded { final_score: i32 },
}

impl GameEvent {
    /// Is this the end-of-game event?
    #[must_use]
    pub fn is_game_end(&self) -> bool {
        matches!(self, GameEvent::GameEnded { .. })
    }
}
