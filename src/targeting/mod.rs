//! Drag-and-drop targeting.
//!
//! - `geometry`: rectangles, points and per-pile footprints
//! - `resolver`: choose the pile a released drag lands on

pub mod geometry;
pub mod resolver;

pub use geometry::{PileGeometry, Point, Rect};
pub use resolver::{resolve_drop_target, DragGesture, DropTarget, TableLayout};
