//! Error type for the benchmark harness.

use strassen_core::{Element, MatrixError, UnknownAlgorithm};

/// Errors raised while running, writing or reading benchmarks.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Invalid operands.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Unknown strategy name.
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),

    /// Invalid benchmark configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Report file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A report line could not be parsed.
    #[error("report line {line}: {reason}")]
    Report {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// Two strategies produced different products for the same operands.
    #[error(
        "{algorithm} disagrees with {reference} at n={n}, repetition {repetition}: \
         C[{row}][{col}] = {got}, expected {expected}"
    )]
    Mismatch {
        /// Matrix size.
        n: usize,
        /// 1-based repetition index.
        repetition: u32,
        /// Strategy whose product is trusted.
        reference: String,
        /// Strategy that disagreed.
        algorithm: String,
        /// Row of the first differing cell.
        row: usize,
        /// Column of the first differing cell.
        col: usize,
        /// Reference value.
        expected: Element,
        /// Value produced by `algorithm`.
        got: Element,
    },

    /// The run was cancelled.
    #[error("benchmark cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display() {
        let err = BenchError::Config("repeats must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "configuration error: repeats must be at least 1"
        );
    }

    #[test]
    fn matrix_error_is_transparent() {
        let err: BenchError = MatrixError::SizeMismatch { left: 3, right: 2 }.into();
        assert_eq!(err.to_string(), "size mismatch: 3x3 vs 2x2");
    }

    #[test]
    fn mismatch_display() {
        let err = BenchError::Mismatch {
            n: 4,
            repetition: 2,
            reference: "classic".into(),
            algorithm: "strassen".into(),
            row: 1,
            col: 3,
            expected: 10,
            got: 11,
        };
        assert_eq!(
            err.to_string(),
            "strassen disagrees with classic at n=4, repetition 2: C[1][3] = 11, expected 10"
        );
    }
}
