//! Error types for the page-text library.
//!
//! Tree walks themselves never fail: malformed zones are skipped. These errors
//! cover the edges of the crate, where hidden-text sources are parsed, trees are
//! deserialized and search queries are compiled.

/// Result type alias for page-text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or querying page text.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Parse error at specific byte offset of a hidden-text source
    #[error("Failed to parse hidden text at byte {offset}: {reason}")]
    ParseError {
        /// Byte offset where error occurred
        offset: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Input ended inside an unterminated zone or string
    #[error("End of input reached unexpectedly")]
    UnexpectedEof,

    /// Structural problem in a zone arena (dangling or cyclic child handles)
    #[error("Invalid text tree: {0}")]
    InvalidTree(String),

    /// Search query rejected before any walk was made
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Zone nesting limit exceeded while parsing in strict mode
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
