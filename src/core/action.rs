//! Player actions and committed move records.
//!
//! `Action` is everything a host can ask the engine to do. It is also the
//! inbound wire shape: `{"action": "move", "data": {...}}`.
//!
//! `MoveRecord` is the undo unit: enough to put a committed transfer back
//! exactly as it was, including the score snapshot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::CardId;
use super::pile::PileId;

/// Cards named by an action or record, bottom-first.
pub type CardList = SmallVec<[CardId; 13]>;

/// A request from the host.
///
/// ```
/// use klondike_engine::core::Action;
///
/// let action: Action = serde_json::from_str(r#"{"action":"draw"}"#).unwrap();
/// assert_eq!(action, Action::Draw);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Action {
    /// Shuffle and deal a fresh game.
    NewGame,
    /// Re-deal the current game from its initial deck order.
    Restart,
    /// Undo the most recent committed move.
    Undo,
    /// Draw from the stock, or recycle the waste when the stock is empty.
    Draw,
    /// Move a run of cards between piles.
    Move {
        cards: CardList,
        source: PileId,
        target: PileId,
    },
    /// Send a single card to its suit's foundation if legal.
    AutoMoveToFoundation { card: CardId },
}

impl Action {
    /// Build a move action.
    #[must_use]
    pub fn move_cards(cards: &[CardId], source: PileId, target: PileId) -> Self {
        Action::Move {
            cards: CardList::from_slice(cards),
            source,
            target,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::NewGame => "newGame",
            Action::Restart => "restart",
            Action::Undo => "undo",
            Action::Draw => "draw",
            Action::Move { .. } => "move",
            Action::AutoMoveToFoundation { .. } => "autoMoveToFoundation",
        }
    }
}

/// A committed move, recorded for undo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The cards moved, bottom-first.
    pub cards: CardList,

    /// Where they came from.
    pub source: PileId,

    /// Where they went.
    pub target: PileId,

    /// Did the move expose a face-down tableau card (and flip it)?
    pub caused_reveal: bool,

    /// Score before the move.
    pub score_before: i32,

    /// Move count before the move.
    pub moves_before: u32,

    /// Win flag before the move.
    pub won_before: bool,
}
