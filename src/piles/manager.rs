//! Pile set: every pile on the table plus card locations.
//!
//! The `PileSet` owns all thirteen piles and keeps a card → pile index so
//! the engine can answer "where is this card?" without scanning. All
//! structural mutations go through here so the index never drifts:
//! - `place` puts a new card on top of a pile (dealing)
//! - `transfer` lifts a run off one pile onto another
//! - `take_all` empties a pile (recycling, resets)

use rustc_hash::FxHashMap;

use crate::core::card::{Card, CardId};
use crate::core::pile::{Pile, PileId, PileRole, Run, FOUNDATION_COUNT, TABLEAU_COUNT};

/// Slot of a pile in the backing vec: stock, waste, tableau 0..7, foundation 0..4.
fn slot(id: PileId) -> Option<usize> {
    if !id.is_valid() {
        return None;
    }
    let index = id.index as usize;
    Some(match id.role {
        PileRole::Stock => 0,
        PileRole::Waste => 1,
        PileRole::Tableau => 2 + index,
        PileRole::Foundation => 2 + TABLEAU_COUNT + index,
    })
}

/// All piles of one Klondike table.
///
/// ## Usage
///
/// ```
/// use klondike_engine::core::{Card, CardId, PileId, Rank, Suit};
/// use klondike_engine::piles::PileSet;
///
/// let mut piles = PileSet::new();
/// let ace = CardId::new(Suit::Hearts, Rank::Ace);
///
/// piles.place(PileId::WASTE, Card::face_up(ace));
/// piles.transfer(PileId::WASTE, ace, PileId::foundation(1));
///
/// assert_eq!(piles.pile_of(ace), Some(PileId::foundation(1)));
/// ```
#[derive(Clone, Debug)]
pub struct PileSet {
    piles: Vec<Pile>,

    /// card -> pile
    locations: FxHashMap<CardId, PileId>,
}

impl Default for PileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PileSet {
    /// Create a table with every pile empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            piles: PileId::all().map(Pile::new).collect(),
            locations: FxHashMap::default(),
        }
    }

    /// Get a pile. `None` for ids that do not exist on a Klondike table.
    #[must_use]
    pub fn get(&self, id: PileId) -> Option<&Pile> {
        self.piles.get(slot(id)?)
    }

    pub(crate) fn get_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        let slot = slot(id)?;
        self.piles.get_mut(slot)
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.piles[0]
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.piles[1]
    }

    /// Tableau columns, left to right.
    #[must_use]
    pub fn tableau(&self) -> &[Pile] {
        &self.piles[2..2 + TABLEAU_COUNT]
    }

    /// Foundations in suit order.
    #[must_use]
    pub fn foundations(&self) -> &[Pile] {
        &self.piles[2 + TABLEAU_COUNT..2 + TABLEAU_COUNT + FOUNDATION_COUNT]
    }

    /// Iterate over every pile.
    pub fn iter(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }

    /// Which pile holds `card`?
    #[must_use]
    pub fn pile_of(&self, card: CardId) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Look up a card's current state.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&Card> {
        let pile = self.get(self.pile_of(card)?)?;
        pile.cards().iter().find(|c| c.id == card)
    }

    /// Number of cards on the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Put a card on top of a pile.
    ///
    /// Panics if the card is already on the table or the pile id is invalid.
    pub fn place(&mut self, pile: PileId, card: Card) {
        if let Some(existing) = self.locations.get(&card.id) {
            panic!("Card {} already on the table in {}", card.id, existing);
        }
        let Some(target) = self.get_mut(pile) else {
            panic!("No such pile: {:?}", pile);
        };
        target.push(card);
        self.locations.insert(card.id, pile);
    }

    /// Move `start` and everything above it from `source` onto `target`.
    ///
    /// Order is preserved and the usual tableau reveal-flip applies to the
    /// source. Returns the moved run; empty (and no change) when either
    /// pile is invalid or `start` is not in `source`.
    pub fn transfer(&mut self, source: PileId, start: CardId, target: PileId) -> Run {
        if self.get(target).is_none() {
            return Run::new();
        }
        let Some(from) = self.get_mut(source) else {
            return Run::new();
        };
        let run = from.remove_from(start);
        for card in &run {
            self.locations.insert(card.id, target);
        }
        if let Some(to) = self.get_mut(target) {
            to.append_all(run.iter().copied());
        }
        run
    }

    /// Pop the top card of a pile, dropping it from the location index.
    ///
    /// Callers must `place` the card somewhere to keep the table whole.
    pub fn pop(&mut self, pile: PileId) -> Option<Card> {
        let card = self.get_mut(pile)?.pop()?;
        self.locations.remove(&card.id);
        Some(card)
    }

    /// Empty one pile, bottom-first, dropping its cards from the index.
    pub fn take_all(&mut self, pile: PileId) -> Vec<Card> {
        let Some(p) = self.get_mut(pile) else {
            return Vec::new();
        };
        let cards = p.take_all();
        for card in &cards {
            self.locations.remove(&card.id);
        }
        cards
    }

    /// Empty every pile.
    pub fn clear(&mut self) {
        for pile in &mut self.piles {
            pile.clear();
        }
        self.locations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn id(suit: Suit, rank: u8) -> CardId {
        CardId::new(suit, Rank::from_value(rank).unwrap())
    }

    #[test]
    fn test_new_is_empty() {
        let piles = PileSet::new();
        assert_eq!(piles.iter().count(), 13);
        assert_eq!(piles.tableau().len(), 7);
        assert_eq!(piles.foundations().len(), 4);
        assert_eq!(piles.total_cards(), 0);
        assert!(piles.iter().all(Pile::is_empty));
    }

    #[test]
    fn test_slots_match_ids() {
        let piles = PileSet::new();
        for pile_id in PileId::all() {
            assert_eq!(piles.get(pile_id).unwrap().id(), pile_id);
        }
        assert_eq!(piles.stock().id(), PileId::STOCK);
        assert_eq!(piles.waste().id(), PileId::WASTE);
        assert!(piles.get(PileId::tableau(7)).is_none());
    }

    #[test]
    fn test_place_and_locate() {
        let mut piles = PileSet::new();
        let card = id(Suit::Spades, 5);

        piles.place(PileId::tableau(3), Card::face_down(card));

        assert_eq!(piles.pile_of(card), Some(PileId::tableau(3)));
        assert_eq!(piles.card(card), Some(&Card::face_down(card)));
        assert_eq!(piles.total_cards(), 1);
    }

    #[test]
    #[should_panic(expected = "already on the table")]
    fn test_duplicate_card_panics() {
        let mut piles = PileSet::new();
        let card = id(Suit::Spades, 5);

        piles.place(PileId::tableau(0), Card::face_up(card));
        piles.place(PileId::tableau(1), Card::face_up(card));
    }

    #[test]
    fn test_transfer_updates_locations() {
        let mut piles = PileSet::new();
        let down = id(Suit::Clubs, 2);
        let nine = id(Suit::Spades, 9);
        let eight = id(Suit::Hearts, 8);

        piles.place(PileId::tableau(0), Card::face_down(down));
        piles.place(PileId::tableau(0), Card::face_up(nine));
        piles.place(PileId::tableau(0), Card::face_up(eight));

        let run = piles.transfer(PileId::tableau(0), nine, PileId::tableau(4));

        assert_eq!(run.len(), 2);
        assert_eq!(piles.pile_of(nine), Some(PileId::tableau(4)));
        assert_eq!(piles.pile_of(eight), Some(PileId::tableau(4)));
        assert_eq!(piles.pile_of(down), Some(PileId::tableau(0)));
        // Reveal-flip on the source column
        assert!(piles.card(down).unwrap().face_up);
        assert_eq!(piles.total_cards(), 3);
    }

    #[test]
    fn test_transfer_invalid_is_noop() {
        let mut piles = PileSet::new();
        let card = id(Suit::Clubs, 2);
        piles.place(PileId::tableau(0), Card::face_up(card));

        assert!(piles.transfer(PileId::tableau(0), card, PileId::tableau(9)).is_empty());
        assert!(piles.transfer(PileId::tableau(1), card, PileId::tableau(2)).is_empty());
        assert_eq!(piles.pile_of(card), Some(PileId::tableau(0)));
    }

    #[test]
    fn test_pop_and_take_all() {
        let mut piles = PileSet::new();
        for rank in 1..=3 {
            piles.place(PileId::WASTE, Card::face_up(id(Suit::Hearts, rank)));
        }

        let top = piles.pop(PileId::WASTE).unwrap();
        assert_eq!(top.id, id(Suit::Hearts, 3));
        assert_eq!(piles.pile_of(top.id), None);

        let rest = piles.take_all(PileId::WASTE);
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].id, id(Suit::Hearts, 1));
        assert_eq!(piles.total_cards(), 0);
    }

    #[test]
    fn test_clear() {
        let mut piles = PileSet::new();
        piles.place(PileId::STOCK, Card::face_down(id(Suit::Hearts, 1)));
        piles.place(PileId::foundation(2), Card::face_up(id(Suit::Diamonds, 1)));

        piles.clear();

        assert_eq!(piles.total_cards(), 0);
        assert!(piles.iter().all(Pile::is_empty));
    }
}
