//! Depth-first walk over leaf zones.
//!
//! The walk keeps its own stack instead of recursing, so a hostile document
//! with absurdly deep nesting cannot exhaust the thread stack. Subtrees deeper
//! than the configured limit are skipped.

use super::{TextTree, ZoneKind};
use crate::geometry::Rect;

/// Separator that belongs in front of a leaf when rebuilding text.
///
/// Variants are ordered by strength, so `max` picks the separator to keep
/// when several boundaries are crossed at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Delimiter {
    /// Leaf continues the previous one (characters of the same word)
    #[default]
    None,
    /// Leaf starts a new word
    Space,
    /// Leaf starts a new line, region or larger block
    Newline,
}

impl Delimiter {
    /// Delimiter for accumulated [`ZoneKind::delimiter_bits`]; newline wins.
    pub fn from_bits(bits: u8) -> Self {
        if bits & 2 != 0 {
            Delimiter::Newline
        } else if bits & 1 != 0 {
            Delimiter::Space
        } else {
            Delimiter::None
        }
    }

    /// Text to insert, if any.
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::None => "",
            Delimiter::Space => " ",
            Delimiter::Newline => "\n",
        }
    }
}

/// A leaf zone reached by [`ZoneWalk`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafVisit<'t, N> {
    /// Leaf handle
    pub node: N,
    /// Leaf kind
    pub kind: ZoneKind,
    /// Leaf rectangle in native units
    pub rect: Rect,
    /// Leaf text fragment
    pub text: &'t str,
    /// Separator implied by the zone boundaries crossed to reach this leaf
    pub delimiter: Delimiter,
    /// Nesting depth (root is 0)
    pub depth: usize,
}

#[derive(Debug)]
struct Frame<N> {
    node: N,
    next_child: usize,
    child_count: usize,
    bits: u8,
    depth: usize,
}

/// Iterator over the well-formed leaves of a tree in reading order.
///
/// Each zone ORs its own delimiter bits into the value it was entered with.
/// Only the first child of a zone inherits the parent's bits; later children
/// start from zero. A leaf's delimiter therefore reflects every boundary the
/// walk crossed since the previous leaf.
pub struct ZoneWalk<'t, T: TextTree> {
    tree: &'t T,
    max_depth: usize,
    stack: Vec<Frame<T::Node>>,
    pending: Option<LeafVisit<'t, T::Node>>,
}

impl<'t, T: TextTree> ZoneWalk<'t, T> {
    /// Start a walk at the root of `tree`.
    pub fn new(tree: &'t T, max_depth: usize) -> Self {
        let mut walk = Self {
            tree,
            max_depth,
            stack: Vec::new(),
            pending: None,
        };
        if let Some(root) = tree.root() {
            walk.pending = walk.enter(root, 0, 0);
        }
        walk
    }

    /// Enter a zone: leaves are returned, structural zones are pushed.
    fn enter(&mut self, node: T::Node, inherited: u8, depth: usize) -> Option<LeafVisit<'t, T::Node>> {
        let tree = self.tree;
        let (Some(kind), Some(rect)) = (tree.kind(node), tree.rect(node)) else {
            log::debug!("Skipping malformed zone {:?}", node);
            return None;
        };

        if depth > self.max_depth {
            log::warn!("Zone {:?} nested deeper than {} levels, skipping subtree", node, self.max_depth);
            return None;
        }

        let bits = inherited | kind.delimiter_bits();
        if let Some(text) = tree.text(node) {
            return Some(LeafVisit {
                node,
                kind,
                rect,
                text,
                delimiter: Delimiter::from_bits(bits),
                depth,
            });
        }

        self.stack.push(Frame {
            node,
            next_child: 0,
            child_count: tree.child_count(node),
            bits,
            depth,
        });
        None
    }
}

impl<'t, T: TextTree> Iterator for ZoneWalk<'t, T> {
    type Item = LeafVisit<'t, T::Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(visit) = self.pending.take() {
            return Some(visit);
        }

        loop {
            let frame = self.stack.last_mut()?;
            if frame.next_child >= frame.child_count {
                self.stack.pop();
                continue;
            }

            let index = frame.next_child;
            frame.next_child += 1;
            let inherited = if index == 0 { frame.bits } else { 0 };
            let depth = frame.depth + 1;
            let parent = frame.node;

            let Some(child) = self.tree.child(parent, index) else {
                log::debug!("Zone {:?} has no child at index {}", parent, index);
                continue;
            };

            if let Some(visit) = self.enter(child, inherited, depth) {
                return Some(visit);
            }
        }
    }
}
