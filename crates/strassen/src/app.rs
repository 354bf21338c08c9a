//! Application entry point and dispatch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use strassen_bench::calibration::{best_cutoff, sweep_cutoffs};
use strassen_bench::report::{create_report, load_report};
use strassen_bench::runner::time_call;
use strassen_bench::{run_benchmark, BenchError, CancellationToken};
use strassen_cli::presenter::{CalibrationReport, MultiplyReport, SummaryReport};
use strassen_cli::{output, ui, BenchPresenter, CliPresenter};
use strassen_core::{select_multipliers, DefaultFactory, Matrix, MultiplierFactory};

use crate::config::{AppConfig, BenchArgs, CalibrateArgs, Command, MultiplyArgs, SummaryArgs};
use crate::version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let presenter = CliPresenter::new(config.verbose, config.quiet);
    match &config.command {
        Command::Bench(args) => run_bench(config, args, &presenter),
        Command::Summary(args) => run_summary(config, args, &presenter),
        Command::Multiply(args) => run_multiply(config, args, &presenter),
        Command::Calibrate(args) => run_calibrate(config, args, &presenter),
        Command::Completion { shell } => {
            let mut cmd = <AppConfig as clap::CommandFactory>::command();
            strassen_cli::completion::generate_completion(&mut cmd, *shell, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_bench(config: &AppConfig, args: &BenchArgs, presenter: &CliPresenter) -> Result<()> {
    let bench = args.bench_config();
    bench.validate()?;

    let factory = DefaultFactory::new(args.engine.options());
    let multipliers = select_multipliers(&args.algo, &factory)?;
    let names: Vec<&str> = multipliers.iter().map(|m| m.name()).collect();

    if config.verbose {
        println!("{}", version::full_version());
    }
    presenter.present_bench_banner(&bench, &names, &args.out_csv);

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone())?;

    let mut writer = create_report(&args.out_csv)
        .with_context(|| format!("cannot create report {}", args.out_csv.display()))?;
    let observer = BenchPresenter::new(config.quiet);
    let outcome = match run_benchmark(&bench, &multipliers, &cancel, &observer, &mut writer) {
        Ok(outcome) => outcome,
        Err(BenchError::Cancelled) => {
            ui::print_warning(&format!(
                "benchmark cancelled; {} is incomplete",
                args.out_csv.display()
            ));
            return Err(BenchError::Cancelled.into());
        }
        Err(e) => return Err(e.into()),
    };

    presenter.present_bench_done(&outcome, &args.out_csv);
    Ok(())
}

fn run_summary(config: &AppConfig, args: &SummaryArgs, presenter: &CliPresenter) -> Result<()> {
    let rows = load_report(&args.csv)
        .with_context(|| format!("cannot read report {}", args.csv.display()))?;
    info!(rows = rows.len(), "report loaded");
    if config.json {
        presenter.present_json(&SummaryReport::from_rows(&rows))?;
    } else {
        presenter.present_summary(&rows);
    }
    Ok(())
}

fn load_matrix(path: &Path, name: &str) -> Result<Matrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read matrix {name} from {}", path.display()))?;
    let rows: Vec<Vec<i64>> = serde_json::from_str(&text)
        .with_context(|| format!("matrix {name} in {} is not a JSON list of rows", path.display()))?;
    Ok(Matrix::from_rows_named(rows, name)?)
}

fn run_multiply(config: &AppConfig, args: &MultiplyArgs, presenter: &CliPresenter) -> Result<()> {
    let a = load_matrix(&args.lhs, "A")?;
    let b = load_matrix(&args.rhs, "B")?;

    let factory = DefaultFactory::new(args.engine.options());
    let multiplier = factory.get(&args.algo)?;
    let (elapsed, product) = time_call(|| multiplier.multiply(&a, &b));
    let product = product?;
    info!(
        algorithm = multiplier.name(),
        n = product.matrix.size(),
        seconds = elapsed.as_secs_f64(),
        "multiplication finished"
    );

    if let Some(path) = &args.output {
        output::write_matrix_json(path, &product.matrix)
            .with_context(|| format!("cannot write product to {}", path.display()))?;
    }

    if config.json {
        presenter.present_json(&MultiplyReport::new(multiplier.name(), &product, elapsed))?;
    } else {
        presenter.present_product(multiplier.name(), multiplier.cutoff(), &product, elapsed);
    }
    Ok(())
}

fn run_calibrate(config: &AppConfig, args: &CalibrateArgs, presenter: &CliPresenter) -> Result<()> {
    let points = sweep_cutoffs(args.size, &args.cutoffs, args.seed, args.iterations)?;
    let best = best_cutoff(&points);
    if config.json {
        presenter.present_json(&CalibrationReport {
            n: args.size,
            best_cutoff: best,
            points: &points,
        })?;
    } else {
        presenter.present_calibration(args.size, &points, best);
    }
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || cancel.cancel()).context("cannot install Ctrl+C handler")
}
