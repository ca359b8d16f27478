//! Parse options.

/// Default limit on structure nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs consumed by the structure parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested structures. Deeper input fails with
    /// [`ParseErrorKind::TooDeep`](crate::ParseErrorKind::TooDeep).
    pub max_depth: usize,
    /// Require every sub-array of a `type[n]` block to hold exactly `n`
    /// values.
    pub check_array_sizes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            check_array_sizes: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_check_array_sizes(mut self, check: bool) -> Self {
        self.check_array_sizes = check;
        self
    }

    // --- Mutable setters ---

    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    pub fn set_check_array_sizes(&mut self, check: bool) {
        self.check_array_sizes = check;
    }
}
