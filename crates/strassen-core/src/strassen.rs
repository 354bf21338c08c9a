//! Strassen's divide-and-conquer multiplication.
//!
//! Inputs whose size is not a power of two are zero-padded, multiplied, and
//! cropped back. Each recursive frame counts one call; frames larger than the
//! cutoff split both operands, issue seven sub-products, and recombine them.
//! Only the split/add/sub/combine work of those frames is timed as structural
//! overhead; padding and cropping are not.
//!
//! [`StrassenEngine`] recurses sequentially with a `&mut StrassenStats`.
//! [`ParallelStrassenEngine`] runs the seven sub-products on the rayon pool
//! above a grain size and records into a [`SharedStats`].

use std::time::Instant;

use rayon::prelude::*;

use crate::classic::{triple_loop, LeafMultiplier};
use crate::constants::DEFAULT_PARALLEL_GRAIN;
use crate::error::MatrixError;
use crate::matrix::{
    add, combine, crop, ensure_same_size, next_power_of_two, pad_to_size, split, sub, Matrix,
};
use crate::stats::{SharedStats, StrassenStats};

/// Sequential Strassen engine with a fixed cutoff.
#[derive(Clone, Copy)]
pub struct StrassenEngine {
    cutoff: usize,
    leaf: LeafMultiplier,
}

impl StrassenEngine {
    /// Create an engine; a cutoff of 0 behaves like 1.
    #[must_use]
    pub fn new(cutoff: usize) -> Self {
        Self {
            cutoff: cutoff.max(1),
            leaf: triple_loop,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_leaf(cutoff: usize, leaf: LeafMultiplier) -> Self {
        Self {
            cutoff: cutoff.max(1),
            leaf,
        }
    }

    /// Effective cutoff.
    #[must_use]
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Multiply `a` by `b`, accumulating into `stats` (or fresh stats).
    #[allow(clippy::cast_possible_truncation)]
    pub fn multiply(
        &self,
        a: &Matrix,
        b: &Matrix,
        stats: Option<StrassenStats>,
    ) -> Result<(Matrix, StrassenStats), MatrixError> {
        let mut stats = stats.unwrap_or_default();
        let product = normalized(a, b, self.cutoff, |a, b| {
            self.recurse(a, b, &mut stats)
        })?;
        tracing::debug!(
            calls = stats.calls,
            structural_ns = stats.structural_time.as_nanos() as u64,
            "strassen multiply finished"
        );
        Ok((product, stats))
    }

    fn recurse(
        &self,
        a: &Matrix,
        b: &Matrix,
        stats: &mut StrassenStats,
    ) -> Result<Matrix, MatrixError> {
        stats.record_call();
        let n = a.size();
        if n == 1 {
            return Ok(Matrix::scalar(a.get(0, 0).wrapping_mul(b.get(0, 0))));
        }
        if n <= self.cutoff {
            return Ok((self.leaf)(a, b));
        }

        let start = Instant::now();
        let pairs = operand_pairs(a, b)?;
        stats.add_structural(start.elapsed());

        let products = pairs
            .iter()
            .map(|(lhs, rhs)| self.recurse(lhs, rhs, stats))
            .collect::<Result<Vec<_>, _>>()?;

        let start = Instant::now();
        let product = assemble(&products)?;
        stats.add_structural(start.elapsed());
        Ok(product)
    }
}

/// Strassen engine that evaluates the seven sub-products concurrently.
#[derive(Clone, Copy)]
pub struct ParallelStrassenEngine {
    cutoff: usize,
    grain: usize,
    leaf: LeafMultiplier,
}

impl ParallelStrassenEngine {
    /// Create an engine with the default parallel grain.
    #[must_use]
    pub fn new(cutoff: usize) -> Self {
        Self::with_grain(cutoff, DEFAULT_PARALLEL_GRAIN)
    }

    /// Create an engine that fans out only for sizes above `grain`.
    #[must_use]
    pub fn with_grain(cutoff: usize, grain: usize) -> Self {
        Self {
            cutoff: cutoff.max(1),
            grain: grain.max(1),
            leaf: triple_loop,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_leaf(cutoff: usize, grain: usize, leaf: LeafMultiplier) -> Self {
        Self {
            cutoff: cutoff.max(1),
            grain: grain.max(1),
            leaf,
        }
    }

    /// Effective cutoff.
    #[must_use]
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Multiply `a` by `b`, accumulating into `stats` (or fresh stats).
    #[allow(clippy::cast_possible_truncation)]
    pub fn multiply(
        &self,
        a: &Matrix,
        b: &Matrix,
        stats: Option<StrassenStats>,
    ) -> Result<(Matrix, StrassenStats), MatrixError> {
        let shared = SharedStats::from_stats(stats.unwrap_or_default());
        let product = normalized(a, b, self.cutoff, |a, b| self.recurse(a, b, &shared))?;
        let stats = shared.snapshot();
        tracing::debug!(
            calls = stats.calls,
            structural_ns = stats.structural_time.as_nanos() as u64,
            "parallel strassen multiply finished"
        );
        Ok((product, stats))
    }

    fn recurse(&self, a: &Matrix, b: &Matrix, stats: &SharedStats) -> Result<Matrix, MatrixError> {
        stats.record_call();
        let n = a.size();
        if n == 1 {
            return Ok(Matrix::scalar(a.get(0, 0).wrapping_mul(b.get(0, 0))));
        }
        if n <= self.cutoff {
            return Ok((self.leaf)(a, b));
        }

        let start = Instant::now();
        let pairs = operand_pairs(a, b)?;
        stats.add_structural(start.elapsed());

        let products = if n > self.grain {
            pairs
                .par_iter()
                .map(|(lhs, rhs)| self.recurse(lhs, rhs, stats))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            pairs
                .iter()
                .map(|(lhs, rhs)| self.recurse(lhs, rhs, stats))
                .collect::<Result<Vec<_>, _>>()?
        };

        let start = Instant::now();
        let product = assemble(&products)?;
        stats.add_structural(start.elapsed());
        Ok(product)
    }
}

/// Multiply with the sequential engine.
pub fn mul_strassen(
    a: &Matrix,
    b: &Matrix,
    cutoff: usize,
    stats: Option<StrassenStats>,
) -> Result<(Matrix, StrassenStats), MatrixError> {
    StrassenEngine::new(cutoff).multiply(a, b, stats)
}

/// Multiply with the parallel engine and the default grain.
pub fn mul_strassen_parallel(
    a: &Matrix,
    b: &Matrix,
    cutoff: usize,
    stats: Option<StrassenStats>,
) -> Result<(Matrix, StrassenStats), MatrixError> {
    ParallelStrassenEngine::new(cutoff).multiply(a, b, stats)
}

/// Validate, pad to a power of two, run `recurse`, and crop the result back.
fn normalized<F>(a: &Matrix, b: &Matrix, cutoff: usize, recurse: F) -> Result<Matrix, MatrixError>
where
    F: FnOnce(&Matrix, &Matrix) -> Result<Matrix, MatrixError>,
{
    ensure_same_size(a, b)?;
    let n = a.size();
    let m = next_power_of_two(n);
    tracing::debug!(n, padded = m, cutoff, "strassen multiply");
    if m == n {
        return recurse(a, b);
    }
    let product = recurse(&pad_to_size(a, m)?, &pad_to_size(b, m)?)?;
    crop(&product, n)
}

/// Split both operands and build the seven operand pairs:
///
/// ```text
/// M1 = (A11 + A22)(B11 + B22)    M5 = (A11 + A12) B22
/// M2 = (A21 + A22) B11           M6 = (A21 - A11)(B11 + B12)
/// M3 = A11 (B12 - B22)           M7 = (A12 - A22)(B21 + B22)
/// M4 = A22 (B21 - B11)
/// ```
fn operand_pairs(a: &Matrix, b: &Matrix) -> Result<[(Matrix, Matrix); 7], MatrixError> {
    let (a11, a12, a21, a22) = split(a)?;
    let (b11, b12, b21, b22) = split(b)?;

    let a11_plus_a22 = add(&a11, &a22)?;
    let b11_plus_b22 = add(&b11, &b22)?;
    let a21_plus_a22 = add(&a21, &a22)?;
    let b12_minus_b22 = sub(&b12, &b22)?;
    let b21_minus_b11 = sub(&b21, &b11)?;
    let a11_plus_a12 = add(&a11, &a12)?;
    let a21_minus_a11 = sub(&a21, &a11)?;
    let b11_plus_b12 = add(&b11, &b12)?;
    let a12_minus_a22 = sub(&a12, &a22)?;
    let b21_plus_b22 = add(&b21, &b22)?;

    Ok([
        (a11_plus_a22, b11_plus_b22),
        (a21_plus_a22, b11),
        (a11, b12_minus_b22),
        (a22, b21_minus_b11),
        (a11_plus_a12, b22),
        (a21_minus_a11, b11_plus_b12),
        (a12_minus_a22, b21_plus_b22),
    ])
}

/// C11 = M1 + M4 - M5 + M7, C12 = M3 + M5, C21 = M2 + M4,
/// C22 = M1 - M2 + M3 + M6.
fn assemble(products: &[Matrix]) -> Result<Matrix, MatrixError> {
    let [m1, m2, m3, m4, m5, m6, m7] = products else {
        return Err(MatrixError::Shape {
            name: "products".into(),
            reason: format!("expected 7 sub-products, got {}", products.len()),
        });
    };
    let c11 = add(&sub(&add(m1, m4)?, m5)?, m7)?;
    let c12 = add(m3, m5)?;
    let c21 = add(m2, m4)?;
    let c22 = add(&add(&sub(m1, m2)?, m3)?, m6)?;
    combine(&c11, &c12, &c21, &c22)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::classic::mul_classic;
    use crate::matrix::Element;

    fn m(rows: &[&[Element]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn random(n: usize, seed: u64, lo: Element, hi: Element) -> Matrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..n * n).map(|_| rng.gen_range(lo..=hi)).collect();
        Matrix::from_vec(n, data).unwrap()
    }

    #[test]
    fn two_by_two_cutoff_one() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[5, 6], &[7, 8]]);
        let (c, stats) = mul_strassen(&a, &b, 1, None).unwrap();
        assert_eq!(c, m(&[&[19, 22], &[43, 50]]));
        // One frame at n=2 plus seven 1x1 frames.
        assert_eq!(stats.calls, 8);
    }

    #[test]
    fn eight_by_eight_cutoff_one_makes_400_calls() {
        let a = random(8, 1, -5, 5);
        let b = random(8, 2, -5, 5);
        let (c, stats) = mul_strassen(&a, &b, 1, None).unwrap();
        assert_eq!(c, mul_classic(&a, &b).unwrap());
        assert_eq!(stats.calls, 400);
    }

    #[test]
    fn three_by_three_pads_and_falls_back() {
        let a = random(3, 3003, -5, 5);
        let b = random(3, 4003, -5, 5);
        let (c, stats) = mul_strassen(&a, &b, 4, None).unwrap();
        assert_eq!(c, mul_classic(&a, &b).unwrap());
        assert_eq!(c.size(), 3);
        assert_eq!(stats.calls, 1);
        assert_eq!(stats.structural_time, Duration::ZERO);
    }

    #[test]
    fn matches_classic_for_small_sizes() {
        for n in [1, 2, 4, 8, 16] {
            for s in 0..10 {
                let a = random(n, 1000 + (n as u64) * 10 + s, -5, 5);
                let b = random(n, 2000 + (n as u64) * 10 + s, -5, 5);
                let (c, _) = mul_strassen(&a, &b, 4, None).unwrap();
                assert_eq!(c, mul_classic(&a, &b).unwrap(), "n={n} seed offset {s}");
            }
        }
    }

    #[test]
    fn matches_classic_for_non_powers_of_two() {
        for n in [3, 5, 6, 10, 12] {
            let a = random(n, 3000 + n as u64, -5, 5);
            let b = random(n, 4000 + n as u64, -5, 5);
            for cutoff in [1, 2, 4] {
                let (c, _) = mul_strassen(&a, &b, cutoff, None).unwrap();
                assert_eq!(c, mul_classic(&a, &b).unwrap(), "n={n} cutoff={cutoff}");
            }
        }
    }

    #[test]
    fn cutoff_zero_behaves_like_one() {
        let a = random(4, 7, -3, 3);
        let b = random(4, 8, -3, 3);
        let (c0, s0) = mul_strassen(&a, &b, 0, None).unwrap();
        let (c1, s1) = mul_strassen(&a, &b, 1, None).unwrap();
        assert_eq!(c0, c1);
        assert_eq!(s0.calls, s1.calls);
    }

    #[test]
    fn size_mismatch_returns_no_matrix() {
        let err = mul_strassen(&Matrix::zeros(3), &Matrix::zeros(2), 1, None).unwrap_err();
        assert_eq!(err, MatrixError::SizeMismatch { left: 3, right: 2 });
    }

    #[test]
    fn existing_stats_are_accumulated() {
        let a = random(4, 11, -3, 3);
        let b = random(4, 12, -3, 3);
        let (_, first) = mul_strassen(&a, &b, 2, None).unwrap();
        assert_eq!(first.calls, 8);
        let (_, second) = mul_strassen(&a, &b, 2, Some(first)).unwrap();
        assert_eq!(second.calls, 16);
        assert!(second.structural_time >= first.structural_time);
    }

    #[test]
    fn overflow_wraps_identically() {
        let a = Matrix::from_vec(2, vec![Element::MAX, 3, -7, Element::MIN]).unwrap();
        let b = Matrix::from_vec(2, vec![5, Element::MAX, Element::MIN, 9]).unwrap();
        let (c, _) = mul_strassen(&a, &b, 1, None).unwrap();
        assert_eq!(c, mul_classic(&a, &b).unwrap());
    }

    const LEAF_DELAY: Duration = Duration::from_millis(20);

    fn slow_leaf(a: &Matrix, b: &Matrix) -> Matrix {
        std::thread::sleep(LEAF_DELAY);
        triple_loop(a, b)
    }

    #[test]
    fn structural_time_excludes_leaf_work() {
        let a = random(4, 21, -5, 5);
        let b = random(4, 22, -5, 5);
        let engine = StrassenEngine::with_leaf(2, slow_leaf);

        let start = Instant::now();
        let (c, stats) = engine.multiply(&a, &b, None).unwrap();
        let total = start.elapsed();

        assert_eq!(c, mul_classic(&a, &b).unwrap());
        assert_eq!(stats.calls, 8);
        assert!(total >= LEAF_DELAY * 7);
        assert!(
            stats.structural_time < LEAF_DELAY,
            "structural time {:?} includes leaf delay",
            stats.structural_time
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        for n in [1, 3, 8, 17, 32] {
            let a = random(n, 500 + n as u64, -9, 9);
            let b = random(n, 600 + n as u64, -9, 9);
            let (seq, seq_stats) = mul_strassen(&a, &b, 2, None).unwrap();
            let (par, par_stats) = ParallelStrassenEngine::with_grain(2, 4)
                .multiply(&a, &b, None)
                .unwrap();
            assert_eq!(seq, par, "n={n}");
            assert_eq!(seq_stats.calls, par_stats.calls, "n={n}");
        }
    }

    #[test]
    fn parallel_default_grain_matches_classic() {
        let a = random(64, 91, -100, 100);
        let b = random(64, 92, -100, 100);
        let (c, stats) = mul_strassen_parallel(&a, &b, 8, None).unwrap();
        assert_eq!(c, mul_classic(&a, &b).unwrap());
        assert_eq!(stats.calls, 400);
    }

    #[test]
    fn parallel_structural_time_excludes_leaf_work() {
        let a = random(4, 31, -5, 5);
        let b = random(4, 32, -5, 5);
        let engine = ParallelStrassenEngine::with_leaf(2, 1, slow_leaf);
        let (c, stats) = engine.multiply(&a, &b, None).unwrap();
        assert_eq!(c, mul_classic(&a, &b).unwrap());
        assert_eq!(stats.calls, 8);
        assert!(stats.structural_time < LEAF_DELAY);
    }

    #[test]
    fn parallel_size_mismatch() {
        let err = mul_strassen_parallel(&Matrix::zeros(2), &Matrix::zeros(4), 1, None)
            .unwrap_err();
        assert_eq!(err, MatrixError::SizeMismatch { left: 2, right: 4 });
    }

    #[test]
    fn assemble_requires_seven_products() {
        let err = assemble(&[Matrix::zeros(1)]).unwrap_err();
        assert!(matches!(err, MatrixError::Shape { .. }));
    }
}
