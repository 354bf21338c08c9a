//! Mapping of errors to process exit codes.

use strassen_bench::BenchError;
use strassen_core::exit_codes;
use strassen_core::{MatrixError, UnknownAlgorithm};

/// Exit code for a [`BenchError`].
#[must_use]
pub fn handle_error(err: &BenchError) -> i32 {
    match err {
        BenchError::Matrix(_) | BenchError::Report { .. } => exit_codes::ERROR_INPUT,
        BenchError::UnknownAlgorithm(_) | BenchError::Config(_) => exit_codes::ERROR_CONFIG,
        BenchError::Mismatch { .. } => exit_codes::ERROR_MISMATCH,
        BenchError::Cancelled => exit_codes::ERROR_CANCELED,
        BenchError::Io(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any error surfaced by the application.
///
/// The first recognized error in the cause chain decides.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<BenchError>() {
            return handle_error(e);
        }
        if cause.is::<MatrixError>() || cause.is::<serde_json::Error>() {
            return exit_codes::ERROR_INPUT;
        }
        if cause.is::<UnknownAlgorithm>() {
            return exit_codes::ERROR_CONFIG;
        }
    }
    exit_codes::ERROR_GENERIC
}
