//! Text search over page hidden text.
//!
//! This module finds every occurrence of a query in a page's flattened text
//! and returns the bounding box of each match. Supports:
//! - Case-insensitive substring search (the default)
//! - Regular expression patterns
//! - Whole-word matching
//! - Result limits
//!
//! ## Example
//!
//! ```
//! use djvu_text::geometry::PageTransform;
//! use djvu_text::search::{SearchOptions, TextSearcher};
//! use djvu_text::zone::PageText;
//!
//! let page = PageText::parse(
//!     r#"(line 0 0 70 10 (word 0 0 30 10 "Cat") (word 40 0 70 10 "dog"))"#,
//!     &Default::default(),
//! )?;
//! let transform = PageTransform::new(14.0, 2.0);
//!
//! let results = TextSearcher::search(&page, "cat", &SearchOptions::default(), &transform, 64)?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].text, "Cat");
//! # Ok::<(), djvu_text::Error>(())
//! ```

mod text_search;

pub use text_search::{SearchOptions, SearchResult, TextSearcher};
