//! Terminal presentation of benchmark runs, products, summaries and
//! calibration sweeps.

use std::cell::Cell;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use strassen_bench::calibration::CutoffPoint;
use strassen_bench::summary::{
    algorithms, mean_by_size_and_algorithm, means_for, sizes, use_log_scale, Metric, SizeSummary,
};
use strassen_bench::{BenchConfig, BenchObserver, BenchRecord, ReportRow, RunOutcome};
use strassen_core::{Matrix, Product};

use crate::output::{format_duration, format_matrix, format_number, format_seconds};
use crate::ui;

/// One benchmark progress line, e.g.
/// `[1/3] strassen : 0.012345 s | calls=57 | structural=0.000321 s`.
#[must_use]
pub fn render_record_line(record: &BenchRecord, repeats: u32) -> String {
    let mut line = format!(
        "[{}/{}] {:<8} : {}",
        record.repetition,
        repeats,
        record.algorithm,
        format_seconds(record.elapsed)
    );
    if let Some(calls) = record.calls {
        let _ = write!(line, " | calls={calls}");
    }
    if let Some(structural) = record.structural_time {
        let _ = write!(line, " | structural={}", format_seconds(structural));
    }
    line
}

/// Prints one line per benchmark record as the run progresses.
#[derive(Debug, Default)]
pub struct BenchPresenter {
    quiet: bool,
    repeats: Cell<u32>,
}

impl BenchPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            repeats: Cell::new(0),
        }
    }
}

impl BenchObserver for BenchPresenter {
    fn on_size_start(&self, n: usize, repeats: u32) {
        self.repeats.set(repeats);
        if !self.quiet {
            println!("\n--- n = {n} ---");
        }
    }

    fn on_record(&self, record: &BenchRecord) {
        if !self.quiet {
            println!("{}", render_record_line(record, self.repeats.get()));
        }
    }
}

/// Machine-readable result of `multiply`.
#[derive(Debug, Serialize)]
pub struct MultiplyReport<'a> {
    pub algorithm: &'a str,
    pub n: usize,
    pub seconds: f64,
    pub calls: Option<u64>,
    pub structural_seconds: Option<f64>,
    pub product: &'a Matrix,
}

impl<'a> MultiplyReport<'a> {
    #[must_use]
    pub fn new(algorithm: &'a str, product: &'a Product, elapsed: Duration) -> Self {
        Self {
            algorithm,
            n: product.matrix.size(),
            seconds: elapsed.as_secs_f64(),
            calls: product.stats.map(|s| s.calls),
            structural_seconds: product.stats.map(|s| s.structural_secs()),
            product: &product.matrix,
        }
    }
}

/// Machine-readable aggregation of a report.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub total_seconds: Vec<SizeSummary>,
    pub calls: Vec<SizeSummary>,
    pub structural_seconds: Vec<SizeSummary>,
}

impl SummaryReport {
    #[must_use]
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        Self {
            total_seconds: mean_by_size_and_algorithm(rows, Metric::TotalSeconds),
            calls: mean_by_size_and_algorithm(rows, Metric::Calls),
            structural_seconds: mean_by_size_and_algorithm(rows, Metric::StructuralSeconds),
        }
    }
}

/// Machine-readable result of a cutoff sweep.
#[derive(Debug, Serialize)]
pub struct CalibrationReport<'a> {
    pub n: usize,
    pub best_cutoff: Option<usize>,
    pub points: &'a [CutoffPoint],
}

/// Render one metric as a size-by-algorithm table.
///
/// Only algorithms with at least one value for `metric` get a column.
/// Returns `None` when no algorithm qualifies.
#[must_use]
pub fn render_metric_table(rows: &[ReportRow], metric: Metric) -> Option<String> {
    let summaries = mean_by_size_and_algorithm(rows, metric);
    let sizes = sizes(rows);
    let columns: Vec<(String, Vec<Option<f64>>)> = algorithms(rows)
        .into_iter()
        .map(|alg| {
            let means = means_for(&summaries, &sizes, &alg);
            (alg, means)
        })
        .filter(|(_, means)| means.iter().any(Option::is_some))
        .collect();
    if columns.is_empty() {
        return None;
    }

    let cell = |v: Option<f64>| match (v, metric) {
        (None, _) => "-".to_string(),
        (Some(v), Metric::Calls) => format!("{v:.1}"),
        (Some(v), _) => format!("{v:.6}"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", metric.label());
    let _ = write!(out, "{:>8}", "n");
    for (alg, _) in &columns {
        let _ = write!(out, " | {alg:>17}");
    }
    for (i, n) in sizes.iter().enumerate() {
        let _ = write!(out, "\n{n:>8}");
        for (_, means) in &columns {
            let _ = write!(out, " | {:>17}", cell(means[i]));
        }
    }

    let all: Vec<Option<f64>> = columns.iter().flat_map(|(_, m)| m.iter().copied()).collect();
    if use_log_scale(&all) {
        let _ = write!(out, "\n(values span two or more orders of magnitude; plot on a log scale)");
    }
    Some(out)
}

/// Presenter for one-shot commands.
pub struct CliPresenter {
    verbose: bool,
    quiet: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print the run settings before a benchmark.
    pub fn present_bench_banner(&self, config: &BenchConfig, algorithms: &[&str], out_csv: &Path) {
        if self.quiet {
            return;
        }
        ui::print_header(&format!("Benchmark: {}", algorithms.join(" vs ")));
        println!("Sizes: {:?}", config.sizes);
        println!(
            "Seed base: {} | Range: [{}, {}]",
            config.seed_base, config.val_min, config.val_max
        );
        println!(
            "Repetitions: {} | Strassen cutoff: {}",
            config.repeats, config.cutoff
        );
        println!("Output CSV: {}", out_csv.display());
    }

    pub fn present_bench_done(&self, outcome: &RunOutcome, out_csv: &Path) {
        if self.quiet {
            return;
        }
        println!();
        ui::print_success(&format!(
            "Benchmark finished in {} ({} records). CSV written to {}",
            format_duration(outcome.elapsed),
            outcome.records.len(),
            out_csv.display()
        ));
    }

    /// Print a product and its statistics.
    pub fn present_product(
        &self,
        algorithm: &str,
        cutoff: Option<usize>,
        product: &Product,
        elapsed: Duration,
    ) {
        if !self.quiet {
            match cutoff {
                Some(cutoff) => println!("Algorithm: {algorithm} (cutoff {cutoff})"),
                None => println!("Algorithm: {algorithm}"),
            }
            println!("Size: {n}x{n}", n = product.matrix.size());
            println!("Duration: {}", format_duration(elapsed));
            if let Some(stats) = product.stats {
                println!("Recursive calls: {}", format_number(stats.calls));
                println!("Structural time: {}", format_duration(stats.structural_time));
            }
        }
        println!("{}", format_matrix(&product.matrix, self.verbose || self.quiet));
    }

    /// Print the aggregated tables of a report.
    pub fn present_summary(&self, rows: &[ReportRow]) {
        if !self.quiet {
            ui::print_header(&format!("Summary of {} rows", rows.len()));
        }
        let metrics = [Metric::TotalSeconds, Metric::Calls, Metric::StructuralSeconds];
        for table in metrics.iter().filter_map(|&m| render_metric_table(rows, m)) {
            println!("{table}\n");
        }
    }

    /// Print a cutoff sweep with the fastest cutoff highlighted.
    pub fn present_calibration(&self, n: usize, points: &[CutoffPoint], best: Option<usize>) {
        if !self.quiet {
            ui::print_header(&format!("Cutoff calibration at n = {n}"));
            println!(
                "{:>8} | {:>12} | {:>12} | {:>12} | {:>12}",
                "cutoff", "median", "min", "max", "calls"
            );
            for p in points {
                let median = format_duration(p.median);
                let median = if Some(p.cutoff) == best {
                    ui::highlight(&median)
                } else {
                    median
                };
                println!(
                    "{:>8} | {:>12} | {:>12} | {:>12} | {:>12}",
                    p.cutoff,
                    median,
                    format_duration(p.min),
                    format_duration(p.max),
                    format_number(p.calls)
                );
            }
        }
        if let Some(best) = best {
            if self.quiet {
                println!("{best}");
            } else {
                ui::print_success(&format!("Fastest cutoff: {best}"));
            }
        }
    }

    /// Print any serializable report as pretty JSON.
    pub fn present_json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
