//! The Klondike move engine.
//!
//! `Solitaire` owns one game session: the table, score and move counters,
//! the undo history and the RNG. Every operation runs to completion and is
//! either applied in full or rejected with no change at all.
//!
//! ## Operations
//!
//! - `new_game` / `restart`: deal a fresh shuffle, or re-deal the current one
//! - `draw`: stock to waste, or recycle the waste when the stock is empty
//! - `try_move`: validate and commit a transfer between piles
//! - `try_auto_move_to_foundation`: send one card to its suit's foundation
//! - `undo`: reverse the most recent committed transfer
//!
//! ## Example
//!
//! ```
//! use klondike_engine::core::GameConfig;
//! use klondike_engine::rules::Solitaire;
//!
//! let mut game = Solitaire::new(GameConfig::default().with_seed(7)).unwrap();
//! assert_eq!(game.piles().stock().len(), 24);
//!
//! game.draw();
//! assert_eq!(game.piles().waste().len(), 3);
//! assert_eq!(game.move_count(), 1);
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::core::{
    Action, Card, CardId, CardList, ConfigError, GameConfig, GameRng, GameRngState, MoveRecord,
    PileId, PileRole, Run, Session, Snapshot, FOUNDATION_COUNT, FOUNDATION_SIZE,
};
use crate::events::GameEvent;
use crate::history::UndoHistory;
use crate::piles::PileSet;

use super::deal;
use super::error::{LayoutError, MoveError};
use super::scoring;

/// Result of a `draw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Moved this many cards from stock to waste.
    Drew(usize),
    /// Stock was empty; this many waste cards went back, reshuffled.
    Recycled(usize),
    /// Stock and waste were both empty.
    Empty,
}

/// A Klondike game session.
///
/// Operations queue [`GameEvent`]s instead of calling back into the host;
/// take them with [`Solitaire::drain_events`].
#[derive(Clone, Debug)]
pub struct Solitaire {
    config: GameConfig,
    piles: PileSet,
    session: Session,
    history: UndoHistory,

    /// Post-shuffle, pre-deal order of the current game.
    initial_deck: Vec<CardId>,

    /// The table as first dealt, for restart.
    start_table: PileSet,

    /// Session RNG; forked once per new game.
    rng: GameRng,

    /// Stream for the current game's recycles.
    game_rng: GameRng,

    /// `game_rng` as it was right after the deal, for restart.
    game_rng_start: GameRngState,

    /// Unbounded; hosts are expected to call `drain_events` after each
    /// operation.
    events: Vec<GameEvent>,
}

impl Solitaire {
    /// Create a session and deal the first game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let game_rng = rng.fork();
        let game_rng_start = game_rng.state();

        let mut game = Self {
            history: UndoHistory::new(config.undo_capacity),
            config,
            piles: PileSet::new(),
            session: Session::new(),
            initial_deck: Vec::new(),
            start_table: PileSet::new(),
            rng,
            game_rng,
            game_rng_start,
            events: Vec::new(),
        };
        game.deal_fresh();
        Ok(game)
    }

    /// Create a session on a hand-built table instead of a shuffled deal.
    ///
    /// Cards are placed bottom-first in iteration order. The table need not
    /// hold all 52 cards. `restart` returns to this layout; `new_game`
    /// deals normally.
    pub fn from_layout(
        config: GameConfig,
        layout: impl IntoIterator<Item = (PileId, Card)>,
    ) -> Result<Self, LayoutError> {
        let mut game = Self::new(config)?;

        let mut seen = FxHashSet::default();
        let mut piles = PileSet::new();
        for (pile, card) in layout {
            if !pile.is_valid() {
                return Err(LayoutError::UnknownPile(pile));
            }
            if !seen.insert(card.id) {
                return Err(LayoutError::DuplicateCard(card.id));
            }
            piles.place(pile, card);
        }

        game.initial_deck = piles.iter().flat_map(|p| p.cards().iter().map(|c| c.id)).collect();
        game.start_table = piles.clone();
        game.piles = piles;
        game.events.clear();
        debug!(cards = game.piles.total_cards(), "custom layout installed");
        Ok(game)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The table.
    #[must_use]
    pub fn piles(&self) -> &PileSet {
        &self.piles
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.session.score
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.session.move_count
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.session.won
    }

    /// The order the current game was dealt from.
    #[must_use]
    pub fn initial_deck_order(&self) -> &[CardId] {
        &self.initial_deck
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Moves currently undoable.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// The run a drag starting at `card` would lift, if any.
    #[must_use]
    pub fn movable_run(&self, card: CardId) -> Run {
        self.piles
            .pile_of(card)
            .and_then(|pile| self.piles.get(pile))
            .map(|pile| pile.movable_run(card))
            .unwrap_or_default()
    }

    /// Pure view of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut foundation_counts = [0; FOUNDATION_COUNT];
        for (count, pile) in foundation_counts.iter_mut().zip(self.piles.foundations()) {
            *count = pile.len();
        }
        Snapshot {
            score: self.session.score,
            move_count: self.session.move_count,
            won: self.session.won,
            undo_depth: self.history.len(),
            stock_count: self.piles.stock().len(),
            waste_count: self.piles.waste().len(),
            foundation_counts,
        }
    }

    // === Events ===

    /// Events queued since the last drain, oldest first.
    ///
    /// The queue is never trimmed by the engine. A host that does not
    /// drain it after each operation keeps every event of the session.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_state(&mut self) {
        self.events.push(GameEvent::StateChanged {
            score: self.session.score,
            move_count: self.session.move_count,
        });
    }

    // === Debug ===

    /// Toggle the debug-only relaxed tableau rule.
    pub fn set_relaxed_tableau(&mut self, relaxed: bool) {
        if relaxed {
            warn!("relaxed tableau enabled: empty columns accept any card");
        }
        self.config.relaxed_tableau = relaxed;
    }

    #[must_use]
    pub fn is_relaxed_tableau(&self) -> bool {
        self.config.relaxed_tableau
    }

    // === Game lifecycle ===

    /// Shuffle a new deck and deal it.
    pub fn new_game(&mut self) {
        self.game_rng = self.rng.fork();
        self.deal_fresh();
    }

    fn deal_fresh(&mut self) {
        self.initial_deck = deal::shuffled_deck(&mut self.game_rng);
        self.game_rng_start = self.game_rng.state();
        deal::deal(&mut self.piles, &self.initial_deck);
        self.start_table = self.piles.clone();
        self.reset_session();
        info!(seed = self.game_rng.seed(), "new game dealt");
    }

    /// Re-deal the current game exactly as it was first dealt.
    ///
    /// Score, moves and undo history are reset. Later recycles replay the
    /// same shuffles as the first attempt.
    pub fn restart(&mut self) {
        self.game_rng = GameRng::from_state(&self.game_rng_start);
        self.piles = self.start_table.clone();
        self.reset_session();
        info!("game restarted");
    }

    fn reset_session(&mut self) {
        self.session = Session::new();
        self.history.clear();
        self.emit_state();
    }

    // === Stock ===

    /// Draw from the stock, or recycle the waste if the stock is empty.
    ///
    /// A draw counts as a move; a recycle does not. Neither is undoable.
    pub fn draw(&mut self) -> DrawOutcome {
        let stock_len = self.piles.stock().len();

        if stock_len > 0 {
            let count = self.config.draw_count.min(stock_len);
            for _ in 0..count {
                if let Some(mut card) = self.piles.pop(PileId::STOCK) {
                    card.set_face_up(true);
                    self.piles.place(PileId::WASTE, card);
                }
            }
            self.session.move_count += 1;
            self.emit_state();
            return DrawOutcome::Drew(count);
        }

        if self.piles.waste().is_empty() {
            return DrawOutcome::Empty;
        }

        // Back face-down, in a fresh order from this game's stream
        let mut cards = self.piles.take_all(PileId::WASTE);
        for card in &mut cards {
            card.set_face_up(false);
        }
        self.game_rng.shuffle(&mut cards);

        let count = cards.len();
        for card in cards {
            self.piles.place(PileId::STOCK, card);
        }
        debug!(count, "recycled waste into stock");
        self.emit_state();
        DrawOutcome::Recycled(count)
    }

    // === Moves ===

    /// Validate a move without committing it.
    ///
    /// `cards` must be the top of `source`, bottom-first, all face-up.
    /// Waste and foundations give up only their top card.
    pub fn check_move(
        &self,
        cards: &[CardId],
        source: PileId,
        target: PileId,
    ) -> Result<(), MoveError> {
        let (&first, _) = cards.split_first().ok_or(MoveError::EmptySelection)?;
        let source_pile = self.piles.get(source).ok_or(MoveError::UnknownPile(source))?;
        let target_pile = self.piles.get(target).ok_or(MoveError::UnknownPile(target))?;

        if source == target {
            return Err(MoveError::SamePile(source));
        }
        if target.role == PileRole::Foundation && cards.len() > 1 {
            return Err(MoveError::FoundationTakesOneCard { count: cards.len() });
        }
        if !target_pile.can_accept_with(first, self.config.relaxed_tableau) {
            return Err(MoveError::NotAccepted { card: first, target });
        }

        if !source_pile.ends_with(cards) {
            return Err(MoveError::NotOnTop { card: first, pile: source });
        }
        let run = &source_pile.cards()[source_pile.len() - cards.len()..];
        if run.iter().any(|c| !c.face_up) {
            return Err(MoveError::FaceDown { pile: source });
        }
        if matches!(source.role, PileRole::Waste | PileRole::Foundation) && cards.len() > 1 {
            return Err(MoveError::SingleCardOnly { pile: source });
        }

        Ok(())
    }

    /// Move `cards` from `source` to `target` if legal.
    ///
    /// Returns false, with nothing changed, when the move is illegal.
    pub fn try_move(&mut self, cards: &[CardId], source: PileId, target: PileId) -> bool {
        if let Err(err) = self.check_move(cards, source, target) {
            debug!(from = %source, to = %target, %err, "move rejected");
            return false;
        }
        self.commit_move(cards, source, target);
        true
    }

    fn commit_move(&mut self, cards: &[CardId], source: PileId, target: PileId) {
        let caused_reveal = source.role == PileRole::Tableau
            && self.piles.get(source).is_some_and(|pile| {
                let below = pile.len() - cards.len();
                below > 0 && !pile.cards()[below - 1].face_up
            });

        let evicted = self.history.push(MoveRecord {
            cards: CardList::from_slice(cards),
            source,
            target,
            caused_reveal,
            score_before: self.session.score,
            moves_before: self.session.move_count,
            won_before: self.session.won,
        });
        if evicted.is_some() {
            debug!(capacity = self.history.capacity(), "oldest undo record evicted");
        }

        self.piles.transfer(source, cards[0], target);

        self.session.score += scoring::move_delta(source.role, target.role);
        self.session.move_count += 1;
        debug!(from = %source, to = %target, count = cards.len(), caused_reveal, "move committed");

        let just_won = self.check_win();
        self.emit_state();
        if just_won {
            self.events.push(GameEvent::GameEnded {
                final_score: self.session.score,
            });
        }
    }

    /// Set the win flag and award the bonus if every foundation just filled.
    fn check_win(&mut self) -> bool {
        if self.session.won {
            return false;
        }
        let complete = self
            .piles
            .foundations()
            .iter()
            .all(|f| f.len() == FOUNDATION_SIZE);
        if !complete {
            return false;
        }

        self.session.won = true;
        self.session.score += scoring::WIN_BONUS;
        info!(score = self.session.score, moves = self.session.move_count, "game won");
        true
    }

    /// Send `card` to the foundation of its suit, if it fits there.
    ///
    /// Does nothing and returns false when no legal move exists.
    pub fn try_auto_move_to_foundation(&mut self, card: CardId) -> bool {
        let Some(source) = self.piles.pile_of(card) else {
            return false;
        };
        let target = PileId::foundation(card.suit.index() as u8);
        if !self.piles.get(target).is_some_and(|f| f.can_accept(card)) {
            return false;
        }
        self.try_move(&[card], source, target)
    }

    // === Undo ===

    /// Reverse the most recent committed move.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.peek() else {
            debug!("nothing to undo");
            return false;
        };

        let in_place = self
            .piles
            .get(record.target)
            .is_some_and(|pile| pile.ends_with(&record.cards));
        if !in_place {
            warn!(pile = %record.target, "undo record no longer matches the table");
            return false;
        }
        let Some(record) = self.history.pop() else {
            return false;
        };

        self.piles.transfer(record.target, record.cards[0], record.source);

        if record.caused_reveal {
            if let Some(pile) = self.piles.get_mut(record.source) {
                let below = pile.len() - record.cards.len();
                if let Some(card) = below.checked_sub(1).and_then(|i| pile.card_mut(i)) {
                    card.set_face_up(false);
                }
            }
        }

        self.session.score = record.score_before;
        self.session.move_count = record.moves_before;
        self.session.won = record.won_before;
        debug!(from = %record.target, to = %record.source, "move undone");

        self.emit_state();
        true
    }

    // === Dispatch ===

    /// Apply a host action. Returns whether anything changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::NewGame => {
                self.new_game();
                true
            }
            Action::Restart => {
                self.restart();
                true
            }
            Action::Undo => self.undo(),
            Action::Draw => self.draw() != DrawOutcome::Empty,
            Action::Move { cards, source, target } => self.try_move(cards, *source, *target),
            Action::AutoMoveToFoundation { card } => self.try_auto_move_to_foundation(*card),
        }
    }
}
