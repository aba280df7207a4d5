//! Drop target resolution.
//!
//! When the player releases a dragged run, the host asks which pile it was
//! dropped on. Resolution is read-only: it never mutates the game, and the
//! host still commits the result through `Solitaire::try_move`.
//!
//! ## Algorithm
//!
//! 1. Piles whose footprint overlaps the dragged rectangle and that would
//!    legally take the run are candidates.
//! 2. The candidate whose footprint center is nearest the dragged center
//!    wins, however small its overlap.
//! 3. With no candidate, the pile under the release point is returned even
//!    if the move there is illegal, so the host can show the rejection.
//! 4. Otherwise nothing: the host snaps the cards back.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{CardId, PileId};
use crate::rules::Solitaire;

use super::geometry::{PileGeometry, Point, Rect};

/// On-screen geometry for every pile the host draws.
#[derive(Clone, Debug, Default)]
pub struct TableLayout {
    piles: FxHashMap<PileId, PileGeometry>,
}

impl TableLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometry of one pile, replacing any previous value.
    pub fn set(&mut self, pile: PileId, geometry: PileGeometry) {
        self.piles.insert(pile, geometry);
    }

    #[must_use]
    pub fn with_pile(mut self, pile: PileId, geometry: PileGeometry) -> Self {
        self.set(pile, geometry);
        self
    }

    #[must_use]
    pub fn get(&self, pile: PileId) -> Option<&PileGeometry> {
        self.piles.get(&pile)
    }

    /// Piles with geometry, in table order.
    fn footprints(&self) -> impl Iterator<Item = (PileId, Rect)> + '_ {
        PileId::all().filter_map(|pile| Some((pile, self.piles.get(&pile)?.footprint())))
    }
}

/// A released drag.
#[derive(Clone, Copy, Debug)]
pub struct DragGesture<'a> {
    /// The dragged run, bottom-first.
    pub cards: &'a [CardId],
    /// Pile the run was lifted from.
    pub source: PileId,
    /// Bounding rectangle of the run at release.
    pub dragged: Rect,
    /// Pointer position at release.
    pub release: Point,
}

/// How a drop target was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// A legal pile under the dragged run.
    Overlap(PileId),
    /// The pile under the release point; the move may be illegal.
    Point(PileId),
}

impl DropTarget {
    #[must_use]
    pub fn pile(self) -> PileId {
        match self {
            DropTarget::Overlap(pile) | DropTarget::Point(pile) => pile,
        }
    }
}

/// Pick the pile a drag was dropped on.
pub fn resolve_drop_target(
    game: &Solitaire,
    gesture: &DragGesture<'_>,
    layout: &TableLayout,
) -> Option<DropTarget> {
    let dragged_center = gesture.dragged.center();

    let mut best: Option<(PileId, f32)> = None;
    for (pile, footprint) in layout.footprints() {
        if pile == gesture.source || !footprint.overlaps(&gesture.dragged) {
            continue;
        }
        if game.check_move(gesture.cards, gesture.source, pile).is_err() {
            continue;
        }
        let distance = footprint.center().distance(dragged_center);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((pile, distance));
        }
    }

    if let Some((pile, distance)) = best {
        debug!(%pile, distance, "drop resolved by overlap");
        return Some(DropTarget::Overlap(pile));
    }

    let fallback = layout
        .footprints()
        .find(|&(pile, footprint)| pile != gesture.source && footprint.contains(gesture.release))
        .map(|(pile, _)| DropTarget::Point(pile));
    debug!(?fallback, "no legal overlap");
    fallback
}
