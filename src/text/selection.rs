//! Rectangle to text: reverse selection over the zone tree.

use crate::geometry::Rect;
use crate::zone::{TextTree, ZoneWalk};

/// First and last leaves, in walk order, that a query rectangle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange<N> {
    /// First intersecting leaf
    pub begin: Option<N>,
    /// Last intersecting leaf
    pub end: Option<N>,
}

impl<N> SelectionRange<N> {
    /// Whether the query rectangle touched no leaf.
    pub fn is_empty(&self) -> bool {
        self.begin.is_none()
    }
}

/// Find the first and last leaves whose rectangles overlap `query`.
///
/// `query` is in native units. Everything between the two leaves counts as
/// selected, even leaves that fall outside the rectangle themselves, the way
/// a text cursor selection runs from one point to another.
pub fn limit<T: TextTree>(tree: &T, query: &Rect, max_depth: usize) -> SelectionRange<T::Node> {
    let mut range = SelectionRange { begin: None, end: None };

    for leaf in ZoneWalk::new(tree, max_depth) {
        if leaf.rect.intersects(query) {
            if range.begin.is_none() {
                range.begin = Some(leaf.node);
            }
            range.end = Some(leaf.node);
        }
    }

    range
}

/// Rebuild the text between the leaves of a selection range.
///
/// Fragments are joined with the separators implied by the tree: nothing
/// between characters of one word, a space between words and a newline when
/// a line or larger zone boundary was crossed. Returns `None` when the range
/// is empty or its first leaf is never reached.
pub fn select_range<T: TextTree>(tree: &T, range: &SelectionRange<T::Node>, max_depth: usize) -> Option<String> {
    let begin = range.begin?;
    let mut content: Option<String> = None;

    for leaf in ZoneWalk::new(tree, max_depth) {
        if content.is_none() {
            if leaf.node != begin {
                continue;
            }
            content = Some(String::new());
        }
        let Some(text) = content.as_mut() else {
            continue;
        };

        if !text.is_empty() {
            text.push_str(leaf.delimiter.as_str());
        }
        text.push_str(leaf.text);

        if Some(leaf.node) == range.end {
            break;
        }
    }

    content
}

/// Text covered by a native-unit rectangle, or `None` if it touches nothing.
///
/// # Examples
///
/// ```
/// use djvu_text::geometry::Rect;
/// use djvu_text::text::select;
/// use djvu_text::zone::PageText;
///
/// let page = PageText::parse(
///     r#"(line 0 0 70 10 (word 0 0 30 10 "cat") (word 40 0 70 10 "dog"))"#,
///     &Default::default(),
/// )?;
/// assert_eq!(select(&page, &Rect::new(0.0, 0.0, 70.0, 10.0), 64).as_deref(), Some("cat dog"));
/// assert_eq!(select(&page, &Rect::new(100.0, 100.0, 120.0, 120.0), 64), None);
/// # Ok::<(), djvu_text::Error>(())
/// ```
pub fn select<T: TextTree>(tree: &T, query: &Rect, max_depth: usize) -> Option<String> {
    let range = limit(tree, query, max_depth);
    if range.is_empty() {
        log::debug!("Selection {} touches no text", query);
        return None;
    }
    select_range(tree, &range, max_depth)
}
