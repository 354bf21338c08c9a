//! One row of benchmark output.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use strassen_core::{Element, StrassenStats};

use crate::config::BenchConfig;

/// Timing and recursion statistics for one strategy on one operand pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// Matrix size.
    pub n: usize,
    /// Strategy name.
    pub algorithm: String,
    /// 1-based repetition index.
    pub repetition: u32,
    /// Wall-clock time of the multiplication.
    pub elapsed: Duration,
    /// Recursive calls (Strassen strategies only).
    pub calls: Option<u64>,
    /// Structural overhead (Strassen strategies only).
    pub structural_time: Option<Duration>,
    /// Base seed of the run; operands use `seed_base + n * 1000 + repetition`.
    pub seed_base: u64,
    /// Lower bound of the operand values.
    pub val_min: Element,
    /// Upper bound of the operand values, inclusive.
    pub val_max: Element,
    /// Strassen cutoff of the run.
    pub cutoff: usize,
}

impl BenchRecord {
    /// Build a record for `algorithm` from the run configuration.
    #[must_use]
    pub fn new(
        config: &BenchConfig,
        n: usize,
        algorithm: &str,
        repetition: u32,
        elapsed: Duration,
        stats: Option<StrassenStats>,
    ) -> Self {
        Self {
            n,
            algorithm: algorithm.to_string(),
            repetition,
            elapsed,
            calls: stats.map(|s| s.calls),
            structural_time: stats.map(|s| s.structural_time),
            seed_base: config.seed_base,
            val_min: config.val_min,
            val_max: config.val_max,
            cutoff: config.cutoff,
        }
    }
}
