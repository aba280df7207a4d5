//! Undo integration tests.
//!
//! Undo must put the table back exactly: card order, face flags, score,
//! move count and the win flag.

use klondike_engine::core::{Card, CardId, GameConfig, PileId, Rank, Suit};
use klondike_engine::rules::Solitaire;

fn id(suit: Suit, rank: u8) -> CardId {
    CardId::new(suit, Rank::from_value(rank).unwrap())
}

fn table_of(game: &Solitaire) -> Vec<Vec<Card>> {
    game.piles().iter().map(|p| p.cards().to_vec()).collect()
}

/// A red queen that can shuttle between two black kings.
fn shuttle_layout() -> Vec<(PileId, Card)> {
    vec![
        (PileId::tableau(0), Card::face_up(id(Suit::Spades, 13))),
        (PileId::tableau(1), Card::face_up(id(Suit::Clubs, 13))),
        (PileId::WASTE, Card::face_up(id(Suit::Hearts, 12))),
    ]
}

// =============================================================================
// Exact Restoration
// =============================================================================

/// Test undoing a move that revealed a card.
#[test]
fn test_undo_conceals_revealed_card() {
    let layout = [
        (PileId::tableau(4), Card::face_down(id(Suit::Diamonds, 3))),
        (PileId::tableau(4), Card::face_down(id(Suit::Clubs, 11))),
        (PileId::tableau(4), Card::face_up(id(Suit::Spades, 1))),
    ];
    let mut game = Solitaire::from_layout(GameConfig::default(), layout).unwrap();
    let before = table_of(&game);

    assert!(game.try_auto_move_to_foundation(id(Suit::Spades, 1)));
    assert!(game.piles().card(id(Suit::Clubs, 11)).unwrap().face_up);

    assert!(game.undo());

    assert_eq!(table_of(&game), before);
    assert!(!game.piles().card(id(Suit::Clubs, 11)).unwrap().face_up);
    assert_eq!(game.score(), 0);
    assert_eq!(game.move_count(), 0);
}

/// Test that undo leaves an already face-up card face-up.
#[test]
fn test_undo_without_reveal() {
    let layout = [
        (PileId::tableau(0), Card::face_up(id(Suit::Diamonds, 9))),
        (PileId::tableau(0), Card::face_up(id(Suit::Spades, 8))),
        (PileId::tableau(1), Card::face_up(id(Suit::Hearts, 9))),
    ];
    let mut game = Solitaire::from_layout(GameConfig::default(), layout).unwrap();
    let before = table_of(&game);

    assert!(game.try_move(&[id(Suit::Spades, 8)], PileId::tableau(0), PileId::tableau(1)));
    assert!(game.undo());

    assert_eq!(table_of(&game), before);
}

/// Test undoing a multi-card run.
#[test]
fn test_undo_run_preserves_order() {
    let layout = [
        (PileId::tableau(0), Card::face_down(id(Suit::Hearts, 2))),
        (PileId::tableau(0), Card::face_up(id(Suit::Clubs, 6))),
        (PileId::tableau(0), Card::face_up(id(Suit::Diamonds, 5))),
        (PileId::tableau(0), Card::face_up(id(Suit::Spades, 4))),
        (PileId::tableau(5), Card::face_up(id(Suit::Hearts, 7))),
    ];
    let mut game = Solitaire::from_layout(GameConfig::default(), layout).unwrap();
    let before = table_of(&game);
    let run = [id(Suit::Clubs, 6), id(Suit::Diamonds, 5), id(Suit::Spades, 4)];

    assert!(game.try_move(&run, PileId::tableau(0), PileId::tableau(5)));
    assert_eq!(game.score(), 5);
    assert!(game.undo());

    assert_eq!(table_of(&game), before);
    assert_eq!(game.score(), 0);
}

/// Test a sequence of undos unwinds in reverse order.
#[test]
fn test_undo_sequence() {
    let mut game = Solitaire::from_layout(GameConfig::default(), shuttle_layout()).unwrap();
    let start = table_of(&game);

    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::WASTE, PileId::tableau(0)));
    let after_first = table_of(&game);
    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::tableau(0), PileId::tableau(1)));
    assert_eq!(game.undo_depth(), 2);

    assert!(game.undo());
    assert_eq!(table_of(&game), after_first);
    assert!(game.undo());
    assert_eq!(table_of(&game), start);
    assert!(!game.undo());
}

// =============================================================================
// Capacity
// =============================================================================

/// Test that the history keeps only the newest moves.
#[test]
fn test_undo_capacity_evicts_oldest() {
    let config = GameConfig::default().with_undo_capacity(10);
    let mut game = Solitaire::from_layout(config, shuttle_layout()).unwrap();

    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::WASTE, PileId::tableau(0)));
    for i in 0..10 {
        let (from, to) = if i % 2 == 0 { (0, 1) } else { (1, 0) };
        assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::tableau(from), PileId::tableau(to)));
    }
    assert_eq!(game.move_count(), 11);
    assert_eq!(game.undo_depth(), 10);

    for _ in 0..10 {
        assert!(game.undo());
    }
    assert!(!game.undo());

    // The waste move was evicted: the queen stays on the tableau
    assert_eq!(game.piles().pile_of(id(Suit::Hearts, 12)), Some(PileId::tableau(0)));
    assert_eq!(game.move_count(), 1);
}

/// Test a small configured capacity.
#[test]
fn test_small_capacity() {
    let config = GameConfig::default().with_undo_capacity(1);
    let mut game = Solitaire::from_layout(config, shuttle_layout()).unwrap();

    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::WASTE, PileId::tableau(0)));
    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::tableau(0), PileId::tableau(1)));

    assert!(game.undo());
    assert!(!game.undo());
}

// =============================================================================
// Win Flag
// =============================================================================

/// Test that undoing the winning move clears the win and the bonus.
#[test]
fn test_undo_winning_move() {
    let mut layout = Vec::new();
    for suit in Suit::ALL {
        let last = if suit == Suit::Clubs { 12 } else { 13 };
        for rank in 1..=last {
            layout.push((PileId::foundation(suit.index() as u8), Card::face_up(id(suit, rank))));
        }
    }
    layout.push((PileId::WASTE, Card::face_up(id(Suit::Clubs, 13))));
    let mut game = Solitaire::from_layout(GameConfig::default(), layout).unwrap();

    assert!(game.try_auto_move_to_foundation(id(Suit::Clubs, 13)));
    assert!(game.is_won());
    assert_eq!(game.score(), 110);

    assert!(game.undo());
    assert!(!game.is_won());
    assert_eq!(game.score(), 0);

    // Winning again fires the end event again
    game.drain_events();
    assert!(game.try_auto_move_to_foundation(id(Suit::Clubs, 13)));
    assert_eq!(game.drain_events().iter().filter(|e| e.is_game_end()).count(), 1);
    assert_eq!(game.score(), 110);
}

/// Test that restart clears the history.
#[test]
fn test_restart_clears_history() {
    let mut game = Solitaire::from_layout(GameConfig::default(), shuttle_layout()).unwrap();
    assert!(game.try_move(&[id(Suit::Hearts, 12)], PileId::WASTE, PileId::tableau(0)));

    game.restart();

    assert!(!game.can_undo());
    assert_eq!(game.snapshot().undo_depth, 0);
    assert_eq!(game.piles().pile_of(id(Suit::Hearts, 12)), Some(PileId::WASTE));
}
