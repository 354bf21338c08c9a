//! Aggregation of report rows into per-size means.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::report::ReportRow;

/// Quantity averaged by [`mean_by_size_and_algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    /// Wall-clock seconds of the whole multiplication.
    TotalSeconds,
    /// Recursive Strassen calls.
    Calls,
    /// Seconds of structural overhead.
    StructuralSeconds,
}

impl Metric {
    /// Value of this metric in `row`, when present.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, row: &ReportRow) -> Option<f64> {
        match self {
            Self::TotalSeconds => row.total_seconds,
            Self::Calls => row.calls.map(|c| c as f64),
            Self::StructuralSeconds => row.structural_seconds,
        }
    }

    /// Heading used for this metric's table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TotalSeconds => "mean total time (s)",
            Self::Calls => "mean recursive calls",
            Self::StructuralSeconds => "mean structural time (s)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Means for one matrix size, keyed by algorithm name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSummary {
    /// Matrix size.
    pub n: usize,
    /// Mean value per algorithm that had at least one value.
    pub means: BTreeMap<String, f64>,
}

impl SizeSummary {
    /// Mean for `algorithm`, if it had any values at this size.
    #[must_use]
    pub fn mean(&self, algorithm: &str) -> Option<f64> {
        self.means.get(algorithm).copied()
    }
}

/// Mean of `metric` for every (size, algorithm) pair, sizes ascending.
///
/// Rows where the metric is empty are ignored; a pair with no values is
/// left out of the map.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_by_size_and_algorithm(rows: &[ReportRow], metric: Metric) -> Vec<SizeSummary> {
    let mut sums: BTreeMap<usize, BTreeMap<String, (f64, usize)>> = BTreeMap::new();
    for row in rows {
        let Some(value) = metric.value(row) else {
            continue;
        };
        let entry = sums
            .entry(row.n)
            .or_default()
            .entry(row.algorithm.clone())
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(n, by_alg)| SizeSummary {
            n,
            means: by_alg
                .into_iter()
                .map(|(alg, (sum, count))| (alg, sum / count as f64))
                .collect(),
        })
        .collect()
}

/// Per-size means of `metric` for one algorithm, aligned with `sizes`.
#[must_use]
pub fn means_for(summaries: &[SizeSummary], sizes: &[usize], algorithm: &str) -> Vec<Option<f64>> {
    sizes
        .iter()
        .map(|&n| {
            summaries
                .iter()
                .find(|s| s.n == n)
                .and_then(|s| s.mean(algorithm))
        })
        .collect()
}

/// Distinct sizes present in `rows`, ascending.
#[must_use]
pub fn sizes(rows: &[ReportRow]) -> Vec<usize> {
    let mut sizes: Vec<usize> = rows.iter().map(|r| r.n).collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Distinct algorithm names in first-seen order.
#[must_use]
pub fn algorithms(rows: &[ReportRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        if !names.contains(&row.algorithm) {
            names.push(row.algorithm.clone());
        }
    }
    names
}

/// Whether a plot of `values` needs a logarithmic axis: at least two
/// positive values whose ratio reaches 100.
#[must_use]
pub fn use_log_scale(values: &[Option<f64>]) -> bool {
    let positive: Vec<f64> = values.iter().flatten().copied().filter(|v| *v > 0.0).collect();
    if positive.len() < 2 {
        return false;
    }
    let min = positive.iter().copied().fold(f64::INFINITY, f64::min);
    let max = positive.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max / min >= 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize, algorithm: &str, total: f64, calls: Option<u64>) -> ReportRow {
        ReportRow {
            n,
            algorithm: algorithm.to_string(),
            repetition: 1,
            total_seconds: Some(total),
            calls,
            structural_seconds: calls.map(|_| total / 10.0),
            seed_base: Some(42),
            val_min: Some(0),
            val_max: Some(10),
            cutoff: Some(64),
        }
    }

    fn sample() -> Vec<ReportRow> {
        vec![
            row(128, "classic", 2.0, None),
            row(128, "strassen", 1.0, Some(8)),
            row(64, "classic", 0.5, None),
            row(64, "classic", 1.5, None),
            row(64, "strassen", 3.0, Some(1)),
            row(64, "strassen", 5.0, Some(1)),
        ]
    }

    #[test]
    fn total_means_sorted_by_size() {
        let summaries = mean_by_size_and_algorithm(&sample(), Metric::TotalSeconds);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].n, 64);
        assert_eq!(summaries[0].mean("classic"), Some(1.0));
        assert_eq!(summaries[0].mean("strassen"), Some(4.0));
        assert_eq!(summaries[1].mean("classic"), Some(2.0));
    }

    #[test]
    fn empty_metric_values_are_ignored() {
        let summaries = mean_by_size_and_algorithm(&sample(), Metric::Calls);
        assert_eq!(summaries[0].mean("classic"), None);
        assert_eq!(summaries[0].mean("strassen"), Some(1.0));
        assert_eq!(summaries[1].mean("strassen"), Some(8.0));
    }

    #[test]
    fn means_for_aligns_with_sizes() {
        let rows = sample();
        let summaries = mean_by_size_and_algorithm(&rows, Metric::StructuralSeconds);
        let sizes = sizes(&rows);
        assert_eq!(sizes, vec![64, 128]);
        let strassen = means_for(&summaries, &sizes, "strassen");
        assert_eq!(strassen.len(), 2);
        assert!((strassen[0].unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(means_for(&summaries, &sizes, "classic"), vec![None, None]);
    }

    #[test]
    fn algorithms_first_seen_order() {
        assert_eq!(algorithms(&sample()), vec!["classic", "strassen"]);
    }

    #[test]
    fn log_scale_rule() {
        assert!(use_log_scale(&[Some(0.001), Some(0.1)]));
        assert!(!use_log_scale(&[Some(0.01), Some(0.5)]));
        assert!(!use_log_scale(&[Some(5.0)]));
        assert!(!use_log_scale(&[Some(0.0), None, Some(1000.0)]));
        assert!(use_log_scale(&[None, Some(1.0), Some(0.0), Some(100.0)]));
    }

    #[test]
    fn metric_labels() {
        assert_eq!(Metric::Calls.to_string(), "mean recursive calls");
        assert_eq!(Metric::TotalSeconds.value(&sample()[0]), Some(2.0));
    }
}
