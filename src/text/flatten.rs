//! Flattening a zone tree into one searchable string.

use super::index::{FlatEntry, FlatIndex};
use crate::zone::{Delimiter, TextTree, ZoneWalk};

/// Page text joined into one buffer, with the index back to its leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatContent<N> {
    /// Leaf fragments in reading order, with a space at word boundaries
    pub text: String,
    /// Offset-to-leaf mapping for `text`
    pub index: FlatIndex<N>,
}

impl<N: Copy> FlatContent<N> {
    /// Whether the page produced no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate every leaf fragment in walk order.
///
/// Fragments are joined with one space whenever the walk crosses a word or
/// larger boundary between them; characters of the same word are joined
/// directly. The recorded offset of each leaf is the buffer length before it
/// was appended, so it points at the separator when there is one. The
/// separator itself belongs to no leaf. Leaves with empty text contribute
/// nothing and get no entry, but a boundary in front of one still separates
/// the next fragment.
///
/// # Examples
///
/// ```
/// use djvu_text::text::flatten;
/// use djvu_text::zone::PageText;
///
/// let page = PageText::parse(
///     r#"(line 0 0 20 10 (word 0 0 20 10 (char 0 0 10 10 "H") (char 10 0 20 10 "i")))"#,
///     &Default::default(),
/// )?;
/// let flat = flatten(&page, 64);
/// assert_eq!(flat.text, "Hi");
/// assert_eq!(flat.index.len(), 2);
/// # Ok::<(), djvu_text::Error>(())
/// ```
pub fn flatten<T: TextTree>(tree: &T, max_depth: usize) -> FlatContent<T::Node> {
    let mut text = String::new();
    let mut index = FlatIndex::new();

    // Boundary crossed since the last fragment; empty leaves pass theirs on.
    let mut pending = Delimiter::None;

    for leaf in ZoneWalk::new(tree, max_depth) {
        pending = pending.max(leaf.delimiter);
        if leaf.text.is_empty() {
            continue;
        }

        let offset = text.len();
        if !text.is_empty() && pending != Delimiter::None {
            text.push(' ');
        }
        pending = Delimiter::None;
        let start = text.len();
        text.push_str(leaf.text);

        index.push(FlatEntry {
            offset,
            start,
            end: text.len(),
            node: leaf.node,
        });
    }

    log::trace!("Flattened {} leaves into {} bytes", index.len(), text.len());

    FlatContent { text, index }
}
