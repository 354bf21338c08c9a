//! # strassen-bench
//!
//! Benchmark harness comparing classic and Strassen multiplication: seeded
//! operand generation, timed runs with cross-validation, CSV reports,
//! report aggregation, and cutoff calibration.

pub mod calibration;
pub mod config;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod progress;
pub mod record;
pub mod report;
pub mod runner;
pub mod summary;

pub use config::BenchConfig;
pub use error::BenchError;
pub use orchestrator::{run_benchmark, RunOutcome};
pub use progress::{BenchObserver, CancellationToken, NoOpObserver};
pub use record::BenchRecord;
pub use report::{CsvReportWriter, RecordSink, ReportRow};
