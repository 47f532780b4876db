//! Bounding rectangles of leaf ranges.

use crate::geometry::Rect;
use crate::zone::{TextTree, ZoneWalk};

/// Smallest rectangle enclosing every leaf from `start` to `end`, inclusive,
/// in walk order.
///
/// Accumulation begins at the first visit of `start` and stops right after
/// `end`. If `end` never follows `start`, everything up to the last leaf is
/// included. Returns `None` if `start` is never reached. The result is in
/// native units.
pub fn bounding_rect<T: TextTree>(tree: &T, start: T::Node, end: T::Node, max_depth: usize) -> Option<Rect> {
    let mut acc: Option<Rect> = None;

    for leaf in ZoneWalk::new(tree, max_depth) {
        if acc.is_none() && leaf.node != start {
            continue;
        }

        acc = Some(match acc {
            Some(rect) => rect.union(&leaf.rect),
            None => leaf.rect,
        });

        if leaf.node == end {
            break;
        }
    }

    acc
}
