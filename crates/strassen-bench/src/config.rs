//! Benchmark configuration.

use serde::{Deserialize, Serialize};

use strassen_core::{Element, DEFAULT_CUTOFF};

use crate::error::BenchError;

/// Default matrix sizes benchmarked when none are given.
pub const DEFAULT_SIZES: [usize; 4] = [64, 128, 256, 512];

/// Default base seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of repetitions per size.
pub const DEFAULT_REPEATS: u32 = 3;

/// Default report path.
pub const DEFAULT_OUT_CSV: &str = "benchmark_results.csv";

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Matrix sizes, in the order they are benchmarked.
    pub sizes: Vec<usize>,
    /// Base seed; each repetition derives its own seed from it.
    pub seed_base: u64,
    /// Smallest generated element (inclusive).
    pub val_min: Element,
    /// Largest generated element (inclusive).
    pub val_max: Element,
    /// Repetitions per size.
    pub repeats: u32,
    /// Strassen cutoff, recorded alongside every row.
    pub cutoff: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed_base: DEFAULT_SEED,
            val_min: 0,
            val_max: 10,
            repeats: DEFAULT_REPEATS,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl BenchConfig {
    /// Check that the configuration describes a runnable benchmark.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.sizes.is_empty() {
            return Err(BenchError::Config("no matrix sizes given".into()));
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::Config("matrix sizes must be at least 1".into()));
        }
        if self.repeats == 0 {
            return Err(BenchError::Config("repeats must be at least 1".into()));
        }
        if self.cutoff == 0 {
            return Err(BenchError::Config("cutoff must be at least 1".into()));
        }
        if self.val_min > self.val_max {
            return Err(BenchError::Config(format!(
                "value range is empty: [{}, {}]",
                self.val_min, self.val_max
            )));
        }
        Ok(())
    }

    /// Total number of (size, repetition) pairs.
    #[must_use]
    pub fn total_runs(&self) -> usize {
        self.sizes.len() * self.repeats as usize
    }
}
