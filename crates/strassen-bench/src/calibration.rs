//! Cutoff calibration: time Strassen at several cutoffs on one operand pair.

use std::hint::black_box;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use strassen_core::classic::first_difference;
use strassen_core::{multiply_classic, predicted_calls, StrassenEngine};

use crate::error::BenchError;
use crate::generator::operand_pair;
use crate::runner::benchmark_detailed;

/// Operand value range used for calibration operands.
const CALIBRATION_RANGE: (i64, i64) = (0, 10);

/// Timing for one cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CutoffPoint {
    /// Cutoff passed to the engine.
    pub cutoff: usize,
    /// Median wall-clock time of the timed runs.
    pub median: Duration,
    /// Fastest timed run.
    pub min: Duration,
    /// Slowest timed run.
    pub max: Duration,
    /// Recursive calls made by one multiplication.
    pub calls: u64,
}

/// Time Strassen multiplication of one seeded `n x n` pair at each cutoff.
///
/// Every cutoff is first checked against the classic product.
#[allow(clippy::cast_possible_truncation)]
pub fn sweep_cutoffs(
    n: usize,
    cutoffs: &[usize],
    seed: u64,
    iterations: u32,
) -> Result<Vec<CutoffPoint>, BenchError> {
    if n == 0 {
        return Err(BenchError::Config("calibration size must be at least 1".into()));
    }
    if cutoffs.is_empty() {
        return Err(BenchError::Config("no cutoffs to calibrate".into()));
    }
    if cutoffs.contains(&0) {
        return Err(BenchError::Config("cutoff must be at least 1".into()));
    }

    let (a, b) = operand_pair(seed, n, 1, CALIBRATION_RANGE.0, CALIBRATION_RANGE.1)?;
    let expected = multiply_classic(&a, &b)?;

    let mut points = Vec::with_capacity(cutoffs.len());
    for &cutoff in cutoffs {
        let engine = StrassenEngine::new(cutoff);
        let (product, stats) = engine.multiply(&a, &b, None)?;
        if let Some((row, col, want, got)) = first_difference(&expected, &product) {
            return Err(BenchError::Mismatch {
                n,
                repetition: 1,
                reference: "classic".into(),
                algorithm: format!("strassen(cutoff={cutoff})"),
                row,
                col,
                expected: want,
                got,
            });
        }
        debug_assert_eq!(stats.calls, predicted_calls(n, cutoff));

        let timing = benchmark_detailed(1, iterations, || {
            black_box(engine.multiply(black_box(&a), black_box(&b), None)).ok();
        });
        debug!(n, cutoff, median_ns = timing.median.as_nanos() as u64, "cutoff timed");
        points.push(CutoffPoint {
            cutoff,
            median: timing.median,
            min: timing.min,
            max: timing.max,
            calls: stats.calls,
        });
    }
    Ok(points)
}

/// Cutoff with the smallest median time; ties go to the smaller cutoff.
#[must_use]
pub fn best_cutoff(points: &[CutoffPoint]) -> Option<usize> {
    points
        .iter()
        .min_by(|x, y| x.median.cmp(&y.median).then(x.cutoff.cmp(&y.cutoff)))
        .map(|p| p.cutoff)
}
