//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use strassen_bench::config::{DEFAULT_OUT_CSV, DEFAULT_REPEATS, DEFAULT_SEED};
use strassen_bench::BenchConfig;
use strassen_core::{Element, Options, DEFAULT_CUTOFF, DEFAULT_PARALLEL_GRAIN};

/// Classic vs Strassen matrix multiplication: multiply, benchmark and analyze.
#[derive(Parser, Debug)]
#[command(name = "strassen", version, about)]
pub struct AppConfig {
    /// Verbose output (also raises the log level to INFO).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only essential output).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print machine-readable JSON (multiply, summary, calibrate).
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Benchmark the selected algorithms over seeded random matrices.
    Bench(BenchArgs),
    /// Aggregate a benchmark CSV report into per-size tables.
    Summary(SummaryArgs),
    /// Multiply two matrices read from JSON files.
    Multiply(MultiplyArgs),
    /// Time Strassen at several cutoffs and report the fastest.
    Calibrate(CalibrateArgs),
    /// Generate a shell completion script.
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Engine tuning shared by every command that multiplies.
#[derive(Args, Debug, Clone, Copy)]
pub struct EngineArgs {
    /// Size at or below which Strassen uses the classic loops.
    #[arg(long, env = "CUTOFF", default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: usize,

    /// Size above which the parallel engine splits work across threads.
    #[arg(long, default_value_t = DEFAULT_PARALLEL_GRAIN)]
    pub parallel_grain: usize,
}

impl EngineArgs {
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            cutoff: self.cutoff,
            parallel_grain: self.parallel_grain,
        }
    }
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Matrix sizes, comma separated.
    #[arg(long, env = "SIZES", value_delimiter = ',', default_value = "64,128,256,512")]
    pub sizes: Vec<usize>,

    /// Base seed for operand generation.
    #[arg(long, env = "SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Smallest generated element.
    #[arg(long, env = "VAL_MIN", default_value_t = 0, allow_negative_numbers = true)]
    pub val_min: Element,

    /// Largest generated element.
    #[arg(long, env = "VAL_MAX", default_value_t = 10, allow_negative_numbers = true)]
    pub val_max: Element,

    /// Repetitions per size.
    #[arg(long, env = "REPEATS", default_value_t = DEFAULT_REPEATS)]
    pub repeats: u32,

    /// CSV report path.
    #[arg(long, env = "OUT_CSV", default_value = DEFAULT_OUT_CSV)]
    pub out_csv: PathBuf,

    /// Algorithms to compare: classic, strassen, parallel, or all.
    #[arg(long, default_value = "classic,strassen")]
    pub algo: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

impl BenchArgs {
    #[must_use]
    pub fn bench_config(&self) -> BenchConfig {
        BenchConfig {
            sizes: self.sizes.clone(),
            seed_base: self.seed,
            val_min: self.val_min,
            val_max: self.val_max,
            repeats: self.repeats,
            cutoff: self.engine.cutoff,
        }
    }
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// CSV report to aggregate.
    #[arg(env = "OUT_CSV", default_value = DEFAULT_OUT_CSV)]
    pub csv: PathBuf,
}

#[derive(Args, Debug)]
pub struct MultiplyArgs {
    /// Left operand: JSON list of rows.
    #[arg(long)]
    pub lhs: PathBuf,

    /// Right operand: JSON list of rows.
    #[arg(long)]
    pub rhs: PathBuf,

    /// Algorithm: classic, strassen or parallel.
    #[arg(long, default_value = "strassen")]
    pub algo: String,

    /// Write the product to this file as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Matrix size to calibrate at.
    #[arg(long, default_value_t = 256)]
    pub size: usize,

    /// Cutoffs to try, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "8,16,32,64,128")]
    pub cutoffs: Vec<usize>,

    /// Seed for the operand pair.
    #[arg(long, env = "SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Timed runs per cutoff.
    #[arg(long, default_value_t = 3)]
    pub iterations: u32,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
