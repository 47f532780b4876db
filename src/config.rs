//! Configuration for page-text walks.

use crate::geometry::DEFAULT_SCALE;

/// Default bound on zone nesting depth during tree walks.
///
/// Real pages nest seven levels deep (page to char); anything far beyond that
/// comes from a corrupt or hostile document.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Page-text processing configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTextConfig {
    /// Page units per native unit.
    pub scale: f64,

    /// Deepest zone level a walk descends into; deeper subtrees are skipped.
    pub max_depth: usize,
}

impl Default for PageTextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTextConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the native-to-page scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the walk depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
