//! Text indexing over zone trees.
//!
//! Two directions are covered:
//! - **Offset to geometry**: [`flatten`] joins the leaves into one buffer and
//!   records a [`FlatIndex`]; offsets found in the buffer resolve back to
//!   leaves with [`FlatIndex::locate`], and [`bounding_rect`] encloses the
//!   leaves of a match.
//! - **Geometry to text**: [`select`] finds the leaves a rectangle touches
//!   and rebuilds their text with word and line separators.
//!
//! All of these walk the tree with the same [`ZoneWalk`](crate::zone::ZoneWalk),
//! which keeps offsets and leaves in step.

mod bounds;
mod flatten;
mod index;
mod selection;

pub use bounds::bounding_rect;
pub use flatten::{flatten, FlatContent};
pub use index::{FlatEntry, FlatIndex};
pub use selection::{limit, select, select_range, SelectionRange};
