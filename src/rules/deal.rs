//! Deck construction and the Klondike deal.
//!
//! Dealing is pile-at-a-time: tableau column `i` receives `i + 1` cards
//! (only the last face-up) before column `i + 1` starts. The 24 cards left
//! over go face-down to the stock in deck order, so the last card of the
//! deck ends up on top of the stock.

use crate::core::{Card, CardId, GameRng, PileId, TABLEAU_COUNT};
use crate::piles::PileSet;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Cards dealt to the tableau (1 + 2 + ... + 7).
pub const TABLEAU_DEAL: usize = TABLEAU_COUNT * (TABLEAU_COUNT + 1) / 2;

/// Build the 52-card deck and Fisher–Yates shuffle it.
#[must_use]
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<CardId> {
    let mut deck: Vec<CardId> = CardId::full_deck().collect();
    rng.shuffle(&mut deck);
    deck
}

/// Clear the table and deal `order` onto it.
///
/// `order` is normally a full shuffled deck; a shorter order simply leaves
/// later piles short.
pub fn deal(piles: &mut PileSet, order: &[CardId]) {
    piles.clear();

    let mut cards = order.iter().copied();

    for column in 0..TABLEAU_COUNT {
        for depth in 0..=column {
            let Some(id) = cards.next() else {
                return;
            };
            let card = if depth == column {
                Card::face_up(id)
            } else {
                Card::face_down(id)
            };
            piles.place(PileId::tableau(column as u8), card);
        }
    }

    for id in cards {
        piles.place(PileId::STOCK, Card::face_down(id));
    }
}
