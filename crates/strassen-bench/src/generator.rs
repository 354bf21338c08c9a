//! Seeded random operands.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strassen_core::{Element, Matrix, MatrixError};

/// Seed for one repetition: `seed_base + n * 1000 + repetition`.
#[must_use]
pub fn local_seed(seed_base: u64, n: usize, repetition: u32) -> u64 {
    seed_base
        .wrapping_add((n as u64).wrapping_mul(1000))
        .wrapping_add(u64::from(repetition))
}

/// `n x n` matrix of integers drawn uniformly from `[min, max]`.
pub fn random_matrix<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    min: Element,
    max: Element,
) -> Result<Matrix, MatrixError> {
    let data = (0..n * n).map(|_| rng.gen_range(min..=max)).collect();
    Matrix::from_vec(n, data)
}

/// Both operands of one repetition, drawn in order from one RNG seeded with
/// [`local_seed`].
pub fn operand_pair(
    seed_base: u64,
    n: usize,
    repetition: u32,
    min: Element,
    max: Element,
) -> Result<(Matrix, Matrix), MatrixError> {
    let mut rng = StdRng::seed_from_u64(local_seed(seed_base, n, repetition));
    let a = random_matrix(n, &mut rng, min, max)?;
    let b = random_matrix(n, &mut rng, min, max)?;
    Ok((a, b))
}
