//! Reasons an engine request is rejected.

use thiserror::Error;

use crate::core::{CardId, ConfigError, PileId};

/// Why `check_move` refused a move.
///
/// Rejection never mutates anything; this type only explains the refusal
/// to hosts and logs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no cards selected")]
    EmptySelection,

    #[error("no such pile: {0:?}")]
    UnknownPile(PileId),

    #[error("source and target are both {0}")]
    SamePile(PileId),

    #[error("foundations take one card at a time (got {count})")]
    FoundationTakesOneCard { count: usize },

    #[error("{target} cannot accept {card}")]
    NotAccepted { card: CardId, target: PileId },

    #[error("{card} and the cards above it are not the top of {pile}")]
    NotOnTop { card: CardId, pile: PileId },

    #[error("selection from {pile} includes a face-down card")]
    FaceDown { pile: PileId },

    #[error("only the top card of {pile} can move")]
    SingleCardOnly { pile: PileId },
}

/// Why `Solitaire::from_layout` refused a table.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} appears more than once")]
    DuplicateCard(CardId),

    #[error("no such pile: {0:?}")]
    UnknownPile(PileId),
}
