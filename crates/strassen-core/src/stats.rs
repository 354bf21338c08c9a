//! Recursion statistics collected by the Strassen engines.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matrix::next_power_of_two;

/// Counters threaded through one Strassen call tree.
///
/// `calls` counts every invocation of the recursive step, including frames
/// that only dispatch to the classic multiplier. `structural_time` covers
/// split, combine and the auxiliary additions, never the nested products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrassenStats {
    /// Number of recursive invocations.
    pub calls: u64,
    /// Time spent on structural bookkeeping.
    pub structural_time: Duration,
}

impl StrassenStats {
    /// Create empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one recursive invocation.
    pub fn record_call(&mut self) {
        self.calls += 1;
    }

    /// Add time spent on structural bookkeeping.
    pub fn add_structural(&mut self, elapsed: Duration) {
        self.structural_time += elapsed;
    }

    /// Structural time in seconds.
    #[must_use]
    pub fn structural_secs(&self) -> f64 {
        self.structural_time.as_secs_f64()
    }
}

/// Thread-safe accumulator used by the parallel engine.
#[derive(Debug, Default)]
pub struct SharedStats {
    calls: AtomicU64,
    structural_nanos: AtomicU64,
}

impl SharedStats {
    /// Seed the accumulator with existing totals.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_stats(stats: StrassenStats) -> Self {
        Self {
            calls: AtomicU64::new(stats.calls),
            structural_nanos: AtomicU64::new(stats.structural_time.as_nanos() as u64),
        }
    }

    /// Count one recursive invocation.
    pub fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Add time spent on structural bookkeeping.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_structural(&self, elapsed: Duration) {
        self.structural_nanos
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Current totals.
    #[must_use]
    pub fn snapshot(&self) -> StrassenStats {
        StrassenStats {
            calls: self.calls.load(Ordering::Relaxed),
            structural_time: Duration::from_nanos(self.structural_nanos.load(Ordering::Relaxed)),
        }
    }
}

/// Number of recursive calls a Strassen multiplication of size `n` makes.
///
/// Follows `calls(m) = 1` if `m <= cutoff` (or `m == 1`), else
/// `1 + 7 * calls(m / 2)`, where `m` is `n` padded to a power of two.
#[must_use]
pub fn predicted_calls(n: usize, cutoff: usize) -> u64 {
    let cutoff = cutoff.max(1);
    let mut size = next_power_of_two(n);
    let mut levels = 0u32;
    while size > cutoff && size > 1 {
        size /= 2;
        levels += 1;
    }
    // 1 + 7 + 7^2 + ... + 7^levels
    (0..=levels).map(|level| 7u64.pow(level)).sum()
}
