//! Core types: cards, piles, actions, session state, RNG, configuration.
//!
//! Everything here is plain data with local rules. The move engine in
//! `rules` combines these into a game.

pub mod card;
pub mod pile;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use card::{Card, CardId, Color, Rank, Suit};
pub use pile::{Pile, PileId, PileRole, Run, FOUNDATION_COUNT, FOUNDATION_SIZE, TABLEAU_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig};
pub use action::{Action, CardList, MoveRecord};
pub use state::{Session, Snapshot};
