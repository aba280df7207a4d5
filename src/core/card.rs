//! Playing cards: identity, color, and stacking predicates.
//!
//! ## CardId
//!
//! The immutable identity of a card (`suit`, `rank`). Every rule in the
//! engine is phrased in terms of identities; two cards with the same
//! identity never coexist in one game.
//!
//! ## Card
//!
//! A card as it lies in a pile: its identity plus the face-up flag.
//! Flipping is the only mutation a card ever sees.

use serde::{Deserialize, Serialize};

/// Card suit.
///
/// The discriminant doubles as the conventional foundation index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// All suits in foundation order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Foundation index for this suit.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color of the suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, Ace (1) through King (13).
///
/// Serialized as its numeric value so host messages stay compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric value (Ace = 1, King = 13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank from its numeric value.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value).ok_or_else(|| format!("rank out of range: {value}"))
    }
}

/// Immutable card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardId {
    /// Create a card identity.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Color of this card.
    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Can this card sit on `other` in a tableau column?
    ///
    /// Requires opposite colors and a rank exactly one lower.
    #[must_use]
    pub fn can_stack_on(self, other: CardId) -> bool {
        self.color() != other.color() && self.rank.value() + 1 == other.rank.value()
    }

    /// Can this card go onto a foundation whose top is `top`?
    ///
    /// An empty foundation takes only an Ace; otherwise the suit must match
    /// and the rank must be exactly one higher.
    #[must_use]
    pub fn can_place_on_foundation(self, top: Option<CardId>) -> bool {
        match top {
            None => self.rank == Rank::Ace,
            Some(top) => self.suit == top.suit && self.rank.value() == top.rank.value() + 1,
        }
    }

    /// The full 52-card set, suit-major with ranks ascending.
    pub fn full_deck() -> impl Iterator<Item = CardId> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| CardId::new(suit, rank)))
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// A card lying in a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity of the card.
    pub id: CardId,

    /// Is the face visible?
    pub face_up: bool,
}

impl Card {
    /// A face-down card.
    #[must_use]
    pub const fn face_down(id: CardId) -> Self {
        Self { id, face_up: false }
    }

    /// A face-up card.
    #[must_use]
    pub const fn face_up(id: CardId) -> Self {
        Self { id, face_up: true }
    }

    /// Set the face-up flag.
    pub fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}
