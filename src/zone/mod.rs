//! Hidden-text zone trees.
//!
//! The decoder hands out a page's text layout as a tree of tagged zones. This
//! module defines the read-only view the rest of the crate walks over
//! ([`TextTree`]), an owned arena implementation ([`PageText`]) and the single
//! depth-first walk ([`ZoneWalk`]) that every text operation shares.
//!
//! Keeping one walk matters: flattening records offsets in walk order, and the
//! rectangle and selection passes resolve those offsets by walking again. If
//! any of them visited zones in a different order the offsets would point at
//! the wrong zones.

mod builder;
mod traversal;
mod types;

pub use builder::{PageText, PageTextBuilder};
pub use traversal::{Delimiter, LeafVisit, ZoneWalk};
pub use types::{NodeId, Zone, ZoneBody, ZoneKind};

use crate::geometry::Rect;
use std::fmt;

/// Read-only access to a tree of text zones.
///
/// Implementations wrap whatever the decoder produced. Node handles are cheap
/// copies; the tree is only borrowed for the duration of a call.
///
/// A node for which [`kind`](TextTree::kind) or [`rect`](TextTree::rect)
/// returns `None` is malformed, and walks skip it together with its subtree.
pub trait TextTree {
    /// Handle identifying a zone.
    type Node: Copy + Eq + fmt::Debug;

    /// Top-level zone, or `None` for a page without text.
    fn root(&self) -> Option<Self::Node>;

    /// Kind of a zone.
    fn kind(&self, node: Self::Node) -> Option<ZoneKind>;

    /// Bounding rectangle of a zone in native units.
    fn rect(&self, node: Self::Node) -> Option<Rect>;

    /// Text fragment of a leaf zone.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Number of child zones.
    fn child_count(&self, node: Self::Node) -> usize;

    /// Child zone at `index`.
    fn child(&self, node: Self::Node, index: usize) -> Option<Self::Node>;

    /// Whether the zone carries text rather than children.
    fn is_leaf(&self, node: Self::Node) -> bool {
        self.text(node).is_some()
    }
}

impl<T: TextTree + ?Sized> TextTree for &T {
    type Node = T::Node;

    fn root(&self) -> Option<Self::Node> {
        (**self).root()
    }

    fn kind(&self, node: Self::Node) -> Option<ZoneKind> {
        (**self).kind(node)
    }

    fn rect(&self, node: Self::Node) -> Option<Rect> {
        (**self).rect(node)
    }

    fn text(&self, node: Self::Node) -> Option<&str> {
        (**self).text(node)
    }

    fn child_count(&self, node: Self::Node) -> usize {
        (**self).child_count(node)
    }

    fn child(&self, node: Self::Node, index: usize) -> Option<Self::Node> {
        (**self).child(node, index)
    }
}
