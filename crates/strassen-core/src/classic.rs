//! Classic O(n^3) multiplication, the reference result and the recursion leaf.

use crate::error::MatrixError;
use crate::matrix::{ensure_same_size, Element, Matrix};

/// Signature of the multiplier used below the Strassen cutoff.
pub(crate) type LeafMultiplier = fn(&Matrix, &Matrix) -> Matrix;

/// Multiply two equally sized square matrices with three nested loops.
pub fn mul_classic(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    ensure_same_size(a, b)?;
    Ok(triple_loop(a, b))
}

/// `C[i][j] = sum_k A[i][k] * B[k][j]` with i outer, j middle, k inner.
/// Callers guarantee equal sizes.
pub(crate) fn triple_loop(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.size();
    let lhs = a.as_slice();
    let rhs = b.as_slice();
    let mut c = Matrix::zeros(n);
    let out = c.data_mut();
    for i in 0..n {
        let a_row = &lhs[i * n..(i + 1) * n];
        for j in 0..n {
            let mut sum: Element = 0;
            for (k, &a_ik) in a_row.iter().enumerate() {
                sum = sum.wrapping_add(a_ik.wrapping_mul(rhs[k * n + j]));
            }
            out[i * n + j] = sum;
        }
    }
    c
}

/// Position and values of the first element where `a` and `b` differ.
///
/// Returns `None` when the matrices are equal. Differing sizes report the
/// origin with both values (or 0 for a missing side).
#[must_use]
pub fn first_difference(a: &Matrix, b: &Matrix) -> Option<(usize, usize, Element, Element)> {
    if a.size() != b.size() {
        return Some((0, 0, a.get(0, 0), b.get(0, 0)));
    }
    let n = a.size();
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .position(|(x, y)| x != y)
        .map(|idx| (idx / n, idx % n, a.as_slice()[idx], b.as_slice()[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[Element]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn two_by_two_product() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[5, 6], &[7, 8]]);
        assert_eq!(mul_classic(&a, &b).unwrap(), m(&[&[19, 22], &[43, 50]]));
    }

    #[test]
    fn identity_is_neutral() {
        let a = m(&[&[2, -1, 0], &[4, 3, 7], &[-5, 1, 9]]);
        let id = Matrix::identity(3);
        assert_eq!(mul_classic(&a, &id).unwrap(), a);
        assert_eq!(mul_classic(&id, &a).unwrap(), a);
    }

    #[test]
    fn one_by_one() {
        let c = mul_classic(&Matrix::scalar(-6), &Matrix::scalar(7)).unwrap();
        assert_eq!(c, Matrix::scalar(-42));
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let err = mul_classic(&Matrix::zeros(3), &Matrix::zeros(2)).unwrap_err();
        assert_eq!(err, MatrixError::SizeMismatch { left: 3, right: 2 });
    }

    #[test]
    fn product_is_not_commutative() {
        let a = m(&[&[0, 1], &[0, 0]]);
        let b = m(&[&[0, 0], &[1, 0]]);
        assert_ne!(
            mul_classic(&a, &b).unwrap(),
            mul_classic(&b, &a).unwrap()
        );
    }

    #[test]
    fn first_difference_reports_position() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[1, 2], &[3, 5]]);
        assert_eq!(first_difference(&a, &b), Some((1, 1, 4, 5)));
        assert_eq!(first_difference(&a, &a), None);
    }
}
