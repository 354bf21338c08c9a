//! Timing helpers.

use std::time::{Duration, Instant};

/// Run `f` once and return its wall-clock time with its result.
pub fn time_call<T, F>(f: F) -> (Duration, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    (start.elapsed(), value)
}

/// Run `f` after `warmup_iters` untimed runs and summarize `measure_iters`
/// timed runs.
pub fn benchmark_detailed<F>(warmup_iters: u32, measure_iters: u32, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    for _ in 0..warmup_iters {
        f();
    }

    let measure_iters = measure_iters.max(1);
    let mut durations: Vec<Duration> = (0..measure_iters).map(|_| time_call(&mut f).0).collect();
    durations.sort();

    let min = durations.first().copied().unwrap_or_default();
    let max = durations.last().copied().unwrap_or_default();
    let mid = durations.len() / 2;
    let median = if durations.len() % 2 == 1 {
        durations[mid]
    } else {
        (durations[mid - 1] + durations[mid]) / 2
    };

    BenchmarkResult { median, min, max }
}

/// Summary of repeated timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// Median of the timed runs.
    pub median: Duration,
    /// Fastest timed run.
    pub min: Duration,
    /// Slowest timed run.
    pub max: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_call_returns_value() {
        let (elapsed, value) = time_call(|| {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(value, 7);
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn detailed_orders_statistics() {
        let result = benchmark_detailed(1, 5, || {
            let _ = (0..100u64).sum::<u64>();
        });
        assert!(result.min <= result.median);
        assert!(result.median <= result.max);
    }

    #[test]
    fn detailed_runs_warmup_and_measurements() {
        let mut count = 0;
        let _ = benchmark_detailed(2, 3, || count += 1);
        assert_eq!(count, 5);
    }

    #[test]
    fn zero_iterations_measures_once() {
        let mut count = 0;
        let result = benchmark_detailed(0, 0, || count += 1);
        assert_eq!(count, 1);
        assert_eq!(result.min, result.max);
        assert_eq!(result.median, result.min);
    }
}
