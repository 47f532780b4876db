//! Text search implementation.
//!
//! Matches are found in the flattened page buffer, mapped back to the leaves
//! that produced them and turned into page-space rectangles.

use crate::error::{Error, Result};
use crate::geometry::{PageTransform, Rect};
use crate::text::{bounding_rect, flatten, FlatIndex};
use crate::zone::TextTree;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// A search result with position information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// The matched text
    pub text: String,
    /// Bounding box of the match in page space
    pub bbox: Rect,
    /// Bounding box of the match in native units
    pub native_bbox: Rect,
    /// Start byte offset in the flattened page text
    pub start_index: usize,
    /// End byte offset (exclusive) in the flattened page text
    pub end_index: usize,
}

/// Options for text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Case insensitive search
    pub case_insensitive: bool,
    /// Treat pattern as literal text (not regex)
    pub literal: bool,
    /// Match whole words only
    pub whole_word: bool,
    /// Maximum number of results (0 = unlimited)
    pub max_results: usize,
}

impl Default for SearchOptions {
    /// Case-insensitive literal substring search without a result limit.
    fn default() -> Self {
        Self {
            case_insensitive: true,
            literal: true,
            whole_word: false,
            max_results: 0,
        }
    }
}

impl SearchOptions {
    /// Create new default search options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal search that respects case.
    pub fn case_sensitive() -> Self {
        Self {
            case_insensitive: false,
            ..Default::default()
        }
    }

    /// Set case sensitivity.
    pub fn with_case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    /// Treat pattern as literal text (escape regex special characters).
    pub fn with_literal(mut self, value: bool) -> Self {
        self.literal = value;
        self
    }

    /// Match whole words only.
    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    /// Limit the number of results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Text searcher for page hidden text.
pub struct TextSearcher;

impl TextSearcher {
    /// Search a page for every non-overlapping occurrence of `pattern`.
    ///
    /// The page is flattened afresh on every call. Matches come back in text
    /// order; a match whose leaves cannot be resolved is skipped rather than
    /// failing the search.
    ///
    /// # Arguments
    ///
    /// * `tree` - The page's zone tree
    /// * `pattern` - Text (or regex, see [`SearchOptions::literal`]) to find
    /// * `options` - Search options
    /// * `transform` - Native-to-page coordinate conversion
    /// * `max_depth` - Zone nesting limit for the tree walks
    ///
    /// # Errors
    ///
    /// [`Error::InvalidQuery`] for an empty pattern or a regex that does not
    /// compile. A page without text is not an error and yields no results.
    pub fn search<T: TextTree>(
        tree: &T,
        pattern: &str,
        options: &SearchOptions,
        transform: &PageTransform,
        max_depth: usize,
    ) -> Result<Vec<SearchResult>> {
        if pattern.is_empty() {
            return Err(Error::InvalidQuery("empty search query".to_string()));
        }
        let regex = Self::build_regex(pattern, options)?;

        let flat = flatten(tree, max_depth);
        if flat.is_empty() {
            log::debug!("Page has no text to search");
            return Ok(Vec::new());
        }

        let mut results = Vec::new();

        for mat in regex.find_iter(&flat.text) {
            if mat.is_empty() {
                continue;
            }
            let start = mat.start();
            let end = mat.end();

            let Some(native_bbox) = Self::compute_match_bbox(tree, &flat.index, start, end, max_depth)
            else {
                log::debug!("Could not resolve zones for match at {}..{}", start, end);
                continue;
            };

            results.push(SearchResult {
                text: mat.as_str().to_string(),
                bbox: transform.to_page(&native_bbox),
                native_bbox,
                start_index: start,
                end_index: end,
            });

            // Check result limit
            if options.max_results > 0 && results.len() >= options.max_results {
                break;
            }
        }

        log::debug!("Found {} matches for {:?}", results.len(), pattern);

        Ok(results)
    }

    /// Build regex from pattern and options.
    fn build_regex(pattern: &str, options: &SearchOptions) -> Result<Regex> {
        let mut pattern_str = if options.literal {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };

        if options.whole_word {
            pattern_str = format!(r"\b(?:{})\b", pattern_str);
        }

        RegexBuilder::new(&pattern_str)
            .case_insensitive(options.case_insensitive)
            .build()
            .map_err(|e| Error::InvalidQuery(format!("Invalid regex pattern: {}", e)))
    }

    /// Native bounding box of the leaves covering `start..end`.
    fn compute_match_bbox<T: TextTree>(
        tree: &T,
        index: &FlatIndex<T::Node>,
        start: usize,
        end: usize,
        max_depth: usize,
    ) -> Option<Rect> {
        let first = index.locate(start)?;
        let last = index.locate(end.checked_sub(1)?)?;
        bounding_rect(tree, first, last, max_depth)
    }
}
