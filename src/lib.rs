// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::manual_find)]

//! # DjVu Text
//!
//! Searchable, selectable text for scanned pages whose text layer is a
//! DjVu-style zone tree (`page`, `column`, `region`, `para`, `line`, `word`,
//! `char`), each zone carrying a rectangle and leaves carrying text.
//!
//! ## Core Features
//!
//! - **Hidden-text parsing**: reads the `djvused print-txt` S-expression format
//! - **Flattening**: one text buffer per page with an offset index back to the leaves
//! - **Search**: case-insensitive (or regex) search returning match rectangles
//! - **Selection**: text under a rectangle, with word and line separators
//! - **Coordinates**: configurable scale, vertical flip and page rotation
//!
//! Any tree that implements [`zone::TextTree`] can be searched and selected;
//! [`zone::PageText`] is the owned implementation used by the parser.
//!
//! ## Quick Start
//!
//! ```
//! use djvu_text::geometry::{PageTransform, Rect};
//! use djvu_text::page::TextPage;
//! use djvu_text::zone::PageText;
//!
//! let tree = PageText::parse(
//!     r#"(page 0 0 100 10
//!          (line 0 0 100 10
//!            (word 0 0 20 10 (char 0 0 10 10 "H") (char 10 0 20 10 "i"))))"#,
//!     &Default::default(),
//! )?;
//! let page = TextPage::new(&tree, PageTransform::new(20.0, 2.0));
//!
//! let rects = page.search_text("hi")?;
//! assert_eq!(rects, vec![Rect::new(0.0, 0.0, 4.0, 2.0)]);
//! # Ok::<(), djvu_text::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;
/// Parser configuration options
pub mod parser_config;

// Hidden-text parsing
pub mod lexer;
pub mod parser;

// Zone tree model and traversal
pub mod geometry;
pub mod zone;

// Flattening, selection and search
pub mod page;
pub mod search;
pub mod text;

// Re-exports
pub use config::PageTextConfig;
pub use error::{Error, Result};
pub use geometry::{PageTransform, Rect, Rotation};
pub use page::TextPage;
pub use parser_config::ParseOptions;
pub use search::{SearchOptions, SearchResult};
pub use zone::{PageText, TextTree, ZoneKind};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
