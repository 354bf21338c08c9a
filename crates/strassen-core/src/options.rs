//! Engine options.

use crate::constants::{DEFAULT_CUTOFF, DEFAULT_PARALLEL_GRAIN};

/// Options for the Strassen engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Size at or below which recursion falls back to the classic multiplier.
    pub cutoff: usize,
    /// Size above which the parallel engine fans out the seven sub-products.
    pub parallel_grain: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            parallel_grain: DEFAULT_PARALLEL_GRAIN,
        }
    }
}

impl Options {
    /// Normalize options. A zero cutoff means recursing down to 1x1 frames;
    /// a zero grain falls back to the default.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.cutoff = self.cutoff.max(1);
        if self.parallel_grain == 0 {
            self.parallel_grain = DEFAULT_PARALLEL_GRAIN;
        }
        self
    }
}
