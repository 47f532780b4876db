/// Parser options for controlling error handling and recovery behavior.
///
/// Hidden text comes out of scanned documents and OCR engines, so damaged
/// zones are common. These options trade strictness for recovering as much
/// of a page as possible.
///
/// # Example
///
/// ```
/// use djvu_text::parser_config::ParseOptions;
///
/// // Strict mode - fail on the first malformed zone
/// let strict = ParseOptions::strict();
///
/// // Lenient mode - drop malformed zones and keep going (default)
/// let lenient = ParseOptions::lenient();
///
/// // Custom configuration
/// let custom = ParseOptions {
///     strict: false,
///     skip_invalid_zones: true,
///     max_errors: 100,
///     max_nesting: 64,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on first malformed zone (true) or attempt recovery (false)
    pub strict: bool,

    /// Drop zones with a bad head or bad coordinates instead of failing
    pub skip_invalid_zones: bool,

    /// Maximum number of dropped zones before giving up (0 = unlimited)
    pub max_errors: usize,

    /// Maximum zone nesting depth
    ///
    /// Prevents stack exhaustion from deeply nested input. Zones nested
    /// deeper than this are an error in strict mode and dropped otherwise.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    /// Default configuration: lenient mode with error limits
    fn default() -> Self {
        Self::lenient()
    }
}

impl ParseOptions {
    /// Strict mode: fail on any malformed zone
    pub fn strict() -> Self {
        Self {
            strict: true,
            skip_invalid_zones: false,
            max_errors: 1,
            max_nesting: crate::config::DEFAULT_MAX_DEPTH,
        }
    }

    /// Lenient mode: drop malformed zones and continue
    pub fn lenient() -> Self {
        Self {
            strict: false,
            skip_invalid_zones: true,
            max_errors: 1000,
            max_nesting: crate::config::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit.
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Check if we should continue parsing after dropping `error_count` zones
    pub(crate) fn should_continue(&self, error_count: usize) -> bool {
        if self.strict || !self.skip_invalid_zones {
            return false;
        }

        if self.max_errors == 0 {
            return true;
        }

        error_count < self.max_errors
    }
}
