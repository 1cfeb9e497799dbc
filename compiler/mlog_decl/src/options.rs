//! Compiler configuration.

/// Default nesting limit for destructuring patterns.
pub const DEFAULT_MAX_PATTERN_DEPTH: usize = 512;

/// Options that affect how declarations are compiled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Name declared stores `line:column` instead of `identifier:line:column`.
    pub compact_names: bool,
    /// Deepest destructuring pattern accepted before compilation fails.
    pub max_pattern_depth: usize,
}

impl CompilerOptions {
    pub fn new() -> Self {
        CompilerOptions {
            compact_names: false,
            max_pattern_depth: DEFAULT_MAX_PATTERN_DEPTH,
        }
    }

    #[must_use]
    pub fn compact_names(mut self, compact: bool) -> Self {
        self.compact_names = compact;
        self
    }

    #[must_use]
    pub fn max_pattern_depth(mut self, depth: usize) -> Self {
        self.max_pattern_depth = depth;
        self
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self::new()
    }
}
