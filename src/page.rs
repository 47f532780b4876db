//! Page-level text access.
//!
//! [`TextPage`] binds a zone tree to the coordinate system of the page it was
//! scanned from, so callers can search and select in page units without
//! dealing with native zone coordinates.

use crate::config::PageTextConfig;
use crate::error::Result;
use crate::geometry::{PageTransform, Rect, Rotation};
use crate::search::{SearchOptions, SearchResult, TextSearcher};
use crate::text::{flatten, select, FlatContent};
use crate::zone::TextTree;

/// Searchable, selectable text of one page.
///
/// The tree is only borrowed and never modified. Every call walks the tree
/// afresh, so results always reflect the tree as it is now.
///
/// # Examples
///
/// ```
/// use djvu_text::page::TextPage;
/// use djvu_text::geometry::{PageTransform, Rect};
/// use djvu_text::zone::PageText;
///
/// let tree = PageText::parse(
///     r#"(line 0 0 70 10 (word 0 0 30 10 "cat") (word 40 0 70 10 "dog"))"#,
///     &Default::default(),
/// )?;
/// let page = TextPage::new(&tree, PageTransform::new(14.0, 2.0));
///
/// assert_eq!(page.search_text("DOG")?, vec![Rect::new(8.0, 0.0, 14.0, 2.0)]);
/// assert_eq!(page.select_text(&Rect::new(0.0, 0.0, 14.0, 2.0)).as_deref(), Some("cat dog"));
/// # Ok::<(), djvu_text::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextPage<'t, T: TextTree> {
    tree: &'t T,
    transform: PageTransform,
    max_depth: usize,
}

impl<'t, T: TextTree> TextPage<'t, T> {
    /// Bind `tree` to a page transform, with the default depth limit.
    pub fn new(tree: &'t T, transform: PageTransform) -> Self {
        Self {
            tree,
            transform,
            max_depth: crate::config::DEFAULT_MAX_DEPTH,
        }
    }

    /// Bind `tree` to a page of `width` x `height` page units.
    pub fn from_config(tree: &'t T, config: &PageTextConfig, width: f64, height: f64) -> Self {
        Self {
            tree,
            transform: PageTransform::new(width, height).with_scale(config.scale),
            max_depth: config.max_depth,
        }
    }

    /// Bind `tree` to a page whose size is taken from the root zone.
    ///
    /// Hidden text normally starts with a page zone spanning the whole scan,
    /// so its far corner gives the page size in native units. Returns `None`
    /// when the tree has no usable root.
    pub fn from_root_zone(tree: &'t T, config: &PageTextConfig) -> Option<Self> {
        let rect = tree.root().and_then(|root| tree.rect(root))?;
        Some(Self {
            tree,
            transform: PageTransform::page_size_from_native(rect.x2, rect.y2, config.scale),
            max_depth: config.max_depth,
        })
    }

    /// Set the current display rotation used by [`TextPage::select_text`].
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.transform = self.transform.with_rotation(rotation);
        self
    }

    /// Set the walk depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The page transform in use.
    pub fn transform(&self) -> &PageTransform {
        &self.transform
    }

    /// The underlying tree.
    pub fn tree(&self) -> &'t T {
        self.tree
    }

    /// Flattened page text with its offset index.
    pub fn flatten(&self) -> FlatContent<T::Node> {
        flatten(self.tree, self.max_depth)
    }

    /// Rectangles, in page units, of every case-insensitive occurrence of
    /// `query`, in text order.
    ///
    /// Occurrences do not overlap. A page without text yields an empty list.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidQuery`] if `query` is empty.
    pub fn search_text(&self, query: &str) -> Result<Vec<Rect>> {
        let results = self.search(query, &SearchOptions::default())?;
        Ok(results.into_iter().map(|result| result.bbox).collect())
    }

    /// Search with explicit options, returning full match details.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        TextSearcher::search(self.tree, query, options, &self.transform, self.max_depth)
    }

    /// Text under a rectangle given in page units, as seen with the current
    /// rotation.
    ///
    /// Returns `None` when no leaf intersects the rectangle.
    pub fn select_text(&self, page_rect: &Rect) -> Option<String> {
        let native = self.transform.to_native(page_rect);
        log::trace!("Selecting page rect {} as native rect {}", page_rect, native);
        self.select_native(&native)
    }

    /// Text under a rectangle already given in native units.
    pub fn select_native(&self, native_rect: &Rect) -> Option<String> {
        select(self.tree, native_rect, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{PageText, PageTextBuilder, ZoneKind};

    fn hi() -> PageText {
        let mut b = PageTextBuilder::new();
        let h = b.leaf(ZoneKind::Char, Rect::new(0.0, 0.0, 10.0, 10.0), "H");
        let i = b.leaf(ZoneKind::Char, Rect::new(10.0, 0.0, 20.0, 10.0), "i");
        let word = b.zone_around(ZoneKind::Word, vec![h, i]);
        let line = b.zone_around(ZoneKind::Line, vec![word]);
        b.build(line)
    }

    fn cat_dog() -> PageText {
        let mut b = PageTextBuilder::new();
        let cat = b.leaf(ZoneKind::Word, Rect::new(0.0, 0.0, 30.0, 10.0), "cat");
        let dog = b.leaf(ZoneKind::Word, Rect::new(40.0, 0.0, 70.0, 10.0), "dog");
        let line = b.zone_around(ZoneKind::Line, vec![cat, dog]);
        b.build(line)
    }

    #[test]
    fn test_search_hi_across_chars() {
        let tree = hi();
        let page = TextPage::new(&tree, PageTransform::new(100.0, 2.0));
        assert_eq!(page.search_text("Hi").unwrap(), vec![Rect::new(0.0, 0.0, 4.0, 2.0)]);
    }

    #[test]
    fn test_search_no_match() {
        let tree = hi();
        let page = TextPage::new(&tree, PageTransform::new(100.0, 2.0));
        assert!(page.search_text("xyz").unwrap().is_empty());
    }

    #[test]
    fn test_search_is_repeatable() {
        let tree = cat_dog();
        let page = TextPage::new(&tree, PageTransform::new(14.0, 2.0));
        let first = page.search_text("o").unwrap();
        let second = page.search_text("o").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_both_words() {
        let tree = cat_dog();
        let page = TextPage::new(&tree, PageTransform::new(14.0, 2.0));
        assert_eq!(page.select_text(&Rect::new(0.0, 0.0, 14.0, 2.0)).as_deref(), Some("cat dog"));
    }

    #[test]
    fn test_select_match_rect_round_trip() {
        let tree = cat_dog();
        let page = TextPage::new(&tree, PageTransform::new(14.0, 2.0));
        let found = page.search_text("dog").unwrap();
        let selected = page.select_text(&found[0]).unwrap();
        assert_eq!(selected, "dog");
    }

    #[test]
    fn test_select_with_half_rotation() {
        let tree = cat_dog();
        let page = TextPage::new(&tree, PageTransform::new(14.0, 2.0).with_scale(0.2))
            .with_rotation(Rotation::Half);
        // Mirrored horizontally, the left edge of the view holds "dog".
        assert_eq!(page.select_text(&Rect::new(0.0, 0.0, 5.0, 2.0)).as_deref(), Some("dog"));
    }

    #[test]
    fn test_empty_tree() {
        let tree = PageText::empty();
        let page = TextPage::new(&tree, PageTransform::new(10.0, 10.0));
        assert!(page.search_text("a").unwrap().is_empty());
        assert_eq!(page.select_text(&Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        assert!(page.flatten().is_empty());
    }

    #[test]
    fn test_from_root_zone() {
        let tree = cat_dog();
        let page = TextPage::from_root_zone(&tree, &PageTextConfig::default()).unwrap();
        assert_eq!(page.transform().width, 14.0);
        assert_eq!(page.transform().height, 2.0);
        assert!(TextPage::from_root_zone(&PageText::empty(), &PageTextConfig::default()).is_none());
    }

    #[test]
    fn test_from_config_scale() {
        let tree = hi();
        let config = PageTextConfig::new().with_scale(1.0);
        let page = TextPage::from_config(&tree, &config, 20.0, 10.0);
        assert_eq!(page.search_text("h").unwrap(), vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
    }
}
