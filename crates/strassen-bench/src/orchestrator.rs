//! Benchmark orchestration: generate operands, time every strategy,
//! cross-check products and stream records to a sink.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use strassen_core::classic::first_difference;
use strassen_core::{Matrix, SquareMultiplier};

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::generator::operand_pair;
use crate::progress::{BenchObserver, CancellationToken};
use crate::record::BenchRecord;
use crate::report::RecordSink;
use crate::runner::time_call;

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Records in execution order: size, then repetition, then strategy.
    pub records: Vec<BenchRecord>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

/// Benchmark `multipliers` over every size and repetition in `config`.
///
/// Operands for each repetition are generated once and shared by all
/// strategies. The first strategy is the reference: any other product that
/// differs from it aborts the run with [`BenchError::Mismatch`].
/// Cancellation is checked before each repetition.
pub fn run_benchmark(
    config: &BenchConfig,
    multipliers: &[Arc<dyn SquareMultiplier>],
    cancel: &CancellationToken,
    observer: &dyn BenchObserver,
    sink: &mut dyn RecordSink,
) -> Result<RunOutcome, BenchError> {
    config.validate()?;
    let Some(reference) = multipliers.first() else {
        return Err(BenchError::Config("no algorithms selected".into()));
    };

    let start = Instant::now();
    let mut records = Vec::with_capacity(config.total_runs() * multipliers.len());

    for &n in &config.sizes {
        info!(n, repeats = config.repeats, "benchmarking size");
        observer.on_size_start(n, config.repeats);

        for repetition in 1..=config.repeats {
            if let Err(e) = cancel.check() {
                warn!(n, repetition, "benchmark cancelled");
                return Err(e);
            }
            let (a, b) = operand_pair(config.seed_base, n, repetition, config.val_min, config.val_max)?;

            let mut expected: Option<Matrix> = None;
            for multiplier in multipliers {
                let (elapsed, product) = time_call(|| multiplier.multiply(&a, &b));
                let product = product?;
                debug!(
                    n,
                    repetition,
                    algorithm = multiplier.name(),
                    seconds = elapsed.as_secs_f64(),
                    "multiplication finished"
                );

                match &expected {
                    None => expected = Some(product.matrix),
                    Some(reference_product) => {
                        if let Some((row, col, want, got)) =
                            first_difference(reference_product, &product.matrix)
                        {
                            return Err(BenchError::Mismatch {
                                n,
                                repetition,
                                reference: reference.name().to_string(),
                                algorithm: multiplier.name().to_string(),
                                row,
                                col,
                                expected: want,
                                got,
                            });
                        }
                    }
                }

                let record = BenchRecord::new(
                    config,
                    n,
                    multiplier.name(),
                    repetition,
                    elapsed,
                    product.stats,
                );
                sink.record(&record)?;
                observer.on_record(&record);
                records.push(record);
            }
        }
    }

    sink.finish()?;
    let elapsed = start.elapsed();
    info!(records = records.len(), seconds = elapsed.as_secs_f64(), "benchmark complete");
    Ok(RunOutcome { records, elapsed })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use strassen_core::{
        predicted_calls, ClassicMultiplier, MatrixError, Product, StrassenMultiplier,
    };

    use super::*;
    use crate::progress::NoOpObserver;
    use crate::report::{read_report, CsvReportWriter};

    fn small_config() -> BenchConfig {
        BenchConfig {
            sizes: vec![4, 5],
            repeats: 2,
            cutoff: 2,
            ..BenchConfig::default()
        }
    }

    fn strategies(cutoff: usize) -> Vec<Arc<dyn SquareMultiplier>> {
        vec![
            Arc::new(ClassicMultiplier::new()),
            Arc::new(StrassenMultiplier::new(cutoff)),
        ]
    }

    /// Adds one to the top-left entry of the true product.
    struct OffByOne;

    impl SquareMultiplier for OffByOne {
        fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product, MatrixError> {
            let mut rows = strassen_core::multiply_classic(a, b)?.to_rows();
            rows[0][0] += 1;
            Ok(Product {
                matrix: Matrix::from_rows(rows)?,
                stats: None,
            })
        }

        fn name(&self) -> &'static str {
            "off-by-one"
        }
    }

    #[derive(Default)]
    struct Recorder {
        sizes: RefCell<Vec<usize>>,
        records: RefCell<usize>,
    }

    impl BenchObserver for Recorder {
        fn on_size_start(&self, n: usize, _repeats: u32) {
            self.sizes.borrow_mut().push(n);
        }

        fn on_record(&self, _record: &BenchRecord) {
            *self.records.borrow_mut() += 1;
        }
    }

    #[test]
    fn produces_one_record_per_strategy_and_run() {
        let config = small_config();
        let mut sink: Vec<BenchRecord> = Vec::new();
        let outcome = run_benchmark(
            &config,
            &strategies(config.cutoff),
            &CancellationToken::new(),
            &NoOpObserver,
            &mut sink,
        )
        .unwrap();

        assert_eq!(outcome.records.len(), 8);
        assert_eq!(sink, outcome.records);
        let order: Vec<(usize, u32, &str)> = outcome
            .records
            .iter()
            .map(|r| (r.n, r.repetition, r.algorithm.as_str()))
            .collect();
        assert_eq!(order[0], (4, 1, "classic"));
        assert_eq!(order[1], (4, 1, "strassen"));
        assert_eq!(order[2], (4, 2, "classic"));
        assert_eq!(order[7], (5, 2, "strassen"));
    }

    #[test]
    fn strassen_records_carry_predicted_calls() {
        let config = small_config();
        let mut sink: Vec<BenchRecord> = Vec::new();
        let outcome = run_benchmark(
            &config,
            &strategies(config.cutoff),
            &CancellationToken::new(),
            &NoOpObserver,
            &mut sink,
        )
        .unwrap();

        for record in &outcome.records {
            if record.algorithm == "strassen" {
                assert_eq!(record.calls, Some(predicted_calls(record.n, 2)));
                assert!(record.structural_time.is_some());
            } else {
                assert_eq!(record.calls, None);
            }
            assert_eq!(record.cutoff, 2);
            assert_eq!(record.seed_base, 42);
        }
    }

    #[test]
    fn mismatch_aborts_run() {
        let config = small_config();
        let multipliers: Vec<Arc<dyn SquareMultiplier>> =
            vec![Arc::new(ClassicMultiplier::new()), Arc::new(OffByOne)];
        let mut sink: Vec<BenchRecord> = Vec::new();
        let err = run_benchmark(
            &config,
            &multipliers,
            &CancellationToken::new(),
            &NoOpObserver,
            &mut sink,
        )
        .unwrap_err();

        match err {
            BenchError::Mismatch {
                n,
                repetition,
                row,
                col,
                got,
                expected,
                ref algorithm,
                ..
            } => {
                assert_eq!((n, repetition, row, col), (4, 1, 0, 0));
                assert_eq!(got, expected + 1);
                assert_eq!(algorithm, "off-by-one");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Only the reference record was emitted before the mismatch.
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut sink: Vec<BenchRecord> = Vec::new();
        let err = run_benchmark(
            &small_config(),
            &strategies(2),
            &cancel,
            &NoOpObserver,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, BenchError::Cancelled));
        assert!(sink.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = BenchConfig {
            repeats: 0,
            ..small_config()
        };
        let mut sink: Vec<BenchRecord> = Vec::new();
        let err = run_benchmark(
            &config,
            &strategies(2),
            &CancellationToken::new(),
            &NoOpObserver,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn no_strategies_is_a_config_error() {
        let mut sink: Vec<BenchRecord> = Vec::new();
        let err = run_benchmark(
            &small_config(),
            &[],
            &CancellationToken::new(),
            &NoOpObserver,
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn observer_sees_sizes_and_records() {
        let observer = Recorder::default();
        let mut sink: Vec<BenchRecord> = Vec::new();
        run_benchmark(
            &small_config(),
            &strategies(2),
            &CancellationToken::new(),
            &observer,
            &mut sink,
        )
        .unwrap();
        assert_eq!(*observer.sizes.borrow(), vec![4, 5]);
        assert_eq!(*observer.records.borrow(), 8);
    }

    #[test]
    fn streams_csv_report() {
        let mut writer = CsvReportWriter::new(Vec::new()).unwrap();
        run_benchmark(
            &small_config(),
            &strategies(2),
            &CancellationToken::new(),
            &NoOpObserver,
            &mut writer,
        )
        .unwrap();
        let bytes = writer.into_inner();
        let rows = read_report(bytes.as_slice()).unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[1].algorithm, "strassen");
        assert_eq!(rows[1].calls, Some(8));
    }
}
