//! Interchangeable square-matrix multiplication strategies.
//!
//! `SquareMultiplier` is the narrow interface consumed by the benchmark
//! harness and the CLI. Strategies are the classic triple loop, sequential
//! Strassen and parallel Strassen, each with its own cutoff.

use crate::classic::mul_classic;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::stats::StrassenStats;
use crate::strassen::{ParallelStrassenEngine, StrassenEngine};

/// Result of one multiplication through a [`SquareMultiplier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The product matrix.
    pub matrix: Matrix,
    /// Recursion statistics, for strategies that collect them.
    pub stats: Option<StrassenStats>,
}

/// A square-matrix multiplication strategy.
pub trait SquareMultiplier: Send + Sync {
    /// Multiply `a` by `b`.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product, MatrixError>;

    /// Short name used in reports (e.g. "classic").
    fn name(&self) -> &str;

    /// Cutoff below which the strategy uses the classic loops, if any.
    fn cutoff(&self) -> Option<usize> {
        None
    }
}

/// Classic O(n^3) strategy.
pub struct ClassicMultiplier;

impl ClassicMultiplier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassicMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl SquareMultiplier for ClassicMultiplier {
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product, MatrixError> {
        Ok(Product {
            matrix: mul_classic(a, b)?,
            stats: None,
        })
    }

    fn name(&self) -> &'static str {
        "classic"
    }
}

/// Sequential Strassen strategy.
pub struct StrassenMultiplier {
    engine: StrassenEngine,
}

impl StrassenMultiplier {
    #[must_use]
    pub fn new(cutoff: usize) -> Self {
        Self {
            engine: StrassenEngine::new(cutoff),
        }
    }
}

impl SquareMultiplier for StrassenMultiplier {
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product, MatrixError> {
        let (matrix, stats) = self.engine.multiply(a, b, None)?;
        Ok(Product {
            matrix,
            stats: Some(stats),
        })
    }

    fn name(&self) -> &'static str {
        "strassen"
    }

    fn cutoff(&self) -> Option<usize> {
        Some(self.engine.cutoff())
    }
}

/// Strassen strategy that runs the seven sub-products on the rayon pool.
pub struct ParallelStrassenMultiplier {
    engine: ParallelStrassenEngine,
}

impl ParallelStrassenMultiplier {
    #[must_use]
    pub fn new(cutoff: usize, grain: usize) -> Self {
        Self {
            engine: ParallelStrassenEngine::with_grain(cutoff, grain),
        }
    }
}

impl SquareMultiplier for ParallelStrassenMultiplier {
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Product, MatrixError> {
        let (matrix, stats) = self.engine.multiply(a, b, None)?;
        Ok(Product {
            matrix,
            stats: Some(stats),
        })
    }

    fn name(&self) -> &'static str {
        "strassen-parallel"
    }

    fn cutoff(&self) -> Option<usize> {
        Some(self.engine.cutoff())
    }
}
