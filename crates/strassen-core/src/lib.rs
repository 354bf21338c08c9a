//! # strassen-core
//!
//! Square integer matrices with classic O(n^3) and Strassen multiplication.
//! The Strassen engines report how many recursive calls they made and how
//! much time went into splitting and recombining quadrants.

pub mod classic;
pub mod constants;
pub mod error;
pub mod matrix;
pub mod multiplier;
pub mod options;
pub mod registry;
pub mod stats;
pub mod strassen;

// Re-exports
pub use constants::{exit_codes, DEFAULT_CUTOFF, DEFAULT_PARALLEL_GRAIN};
pub use error::MatrixError;
pub use matrix::{Element, Matrix};
pub use multiplier::{
    ClassicMultiplier, ParallelStrassenMultiplier, Product, SquareMultiplier, StrassenMultiplier,
};
pub use options::Options;
pub use registry::{select_multipliers, DefaultFactory, MultiplierFactory, UnknownAlgorithm};
pub use stats::{predicted_calls, SharedStats, StrassenStats};
pub use strassen::{ParallelStrassenEngine, StrassenEngine};

/// Multiply two square matrices with the classic triple loop.
///
/// # Example
/// ```
/// use strassen_core::{multiply_classic, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
/// let c = multiply_classic(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
/// ```
pub fn multiply_classic(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    classic::mul_classic(a, b)
}

/// Multiply two square matrices with Strassen's algorithm.
///
/// Pass `Some(stats)` to keep accumulating into an existing record across
/// calls; `None` starts from zero.
///
/// # Example
/// ```
/// use strassen_core::{multiply_strassen, Matrix};
///
/// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
/// let (c, stats) = multiply_strassen(&a, &b, 1, None).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19, 22], vec![43, 50]]);
/// assert_eq!(stats.calls, 8);
/// ```
pub fn multiply_strassen(
    a: &Matrix,
    b: &Matrix,
    cutoff: usize,
    stats: Option<StrassenStats>,
) -> Result<(Matrix, StrassenStats), MatrixError> {
    strassen::mul_strassen(a, b, cutoff, stats)
}

/// Strassen multiplication with the seven sub-products run in parallel.
pub fn multiply_strassen_parallel(
    a: &Matrix,
    b: &Matrix,
    cutoff: usize,
    stats: Option<StrassenStats>,
) -> Result<(Matrix, StrassenStats), MatrixError> {
    strassen::mul_strassen_parallel(a, b, cutoff, stats)
}
