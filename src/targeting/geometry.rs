//! Axis-aligned rectangle math for drop targeting.
//!
//! Coordinates are in whatever space the host renders in; the engine only
//! compares them. `y` grows in whichever direction the host likes.

use serde::{Deserialize, Serialize};

/// A point in host space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle, stored as its minimum corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Do the rectangles share any interior area?
    ///
    /// Rectangles that only touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Is `point` inside or on the edge of this rectangle?
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.max_x().max(other.max_x()) - x, self.max_y().max(other.max_y()) - y)
    }
}

/// Where a pile sits on screen.
///
/// `anchor` is the pile's slot (drawn even when empty); `cards` holds the
/// rectangle of each visible card, in any order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PileGeometry {
    pub anchor: Rect,
    #[serde(default)]
    pub cards: Vec<Rect>,
}

impl PileGeometry {
    /// Geometry of an empty pile.
    #[must_use]
    pub fn new(anchor: Rect) -> Self {
        Self { anchor, cards: Vec::new() }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Rect>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// The area the pile claims: anchor plus every card.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        self.cards.iter().fold(self.anchor, |acc, card| acc.union(card))
    }
}
