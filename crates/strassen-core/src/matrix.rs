//! Dense square integer matrices and the structural helpers used by Strassen.
//!
//! Storage is a flat row-major `Vec<i64>`. Every operation allocates a fresh
//! result and leaves its inputs untouched. Arithmetic wraps on overflow so the
//! classic and Strassen paths agree bit-for-bit in debug and release builds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Element type of every matrix handled by the engine.
pub type Element = i64;

/// The four quadrants of an even-sized matrix:
/// (top-left, top-right, bottom-left, bottom-right).
pub type Quadrants = (Matrix, Matrix, Matrix, Matrix);

/// Square `n x n` matrix of [`Element`]s, `n >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Element>>", into = "Vec<Vec<Element>>")]
pub struct Matrix {
    n: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// Create an `n x n` matrix filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        assert!(n >= 1, "matrix size must be at least 1");
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Create the `n x n` identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Create a 1x1 matrix holding `value`.
    #[must_use]
    pub fn scalar(value: Element) -> Self {
        Self {
            n: 1,
            data: vec![value],
        }
    }

    /// Build a matrix from flat row-major data of length `n * n`.
    pub fn from_vec(n: usize, data: Vec<Element>) -> Result<Self, MatrixError> {
        if n == 0 {
            return Err(MatrixError::shape("matrix", "size must be at least 1"));
        }
        if data.len() != n * n {
            return Err(MatrixError::shape(
                "matrix",
                format!("{} elements cannot form a {n}x{n} matrix", data.len()),
            ));
        }
        Ok(Self { n, data })
    }

    /// Build a matrix from rows, validating that they form a square.
    pub fn from_rows(rows: Vec<Vec<Element>>) -> Result<Self, MatrixError> {
        Self::from_rows_named(rows, "matrix")
    }

    /// Like [`Matrix::from_rows`], but errors name the matrix `name`.
    pub fn from_rows_named(rows: Vec<Vec<Element>>, name: &str) -> Result<Self, MatrixError> {
        let n = assert_square(&rows, name)?;
        let data = rows.into_iter().flatten().collect();
        Ok(Self { n, data })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Element at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Element {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds");
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Element]> {
        self.data.chunks_exact(self.n)
    }

    /// Flat row-major view of the elements.
    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    /// Copy the matrix out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Element>> {
        self.rows().map(<[Element]>::to_vec).collect()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Element] {
        &mut self.data
    }
}

impl TryFrom<Vec<Vec<Element>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<Element>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<Element>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .data
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v:>width$}")?;
            }
        }
        Ok(())
    }
}

/// Create an `n x n` zero matrix. Panics if `n` is 0.
#[must_use]
pub fn zeros(n: usize) -> Matrix {
    Matrix::zeros(n)
}

/// Fail with `SizeMismatch` unless `a` and `b` have the same size.
pub fn ensure_same_size(a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    if a.n == b.n {
        Ok(())
    } else {
        Err(MatrixError::SizeMismatch {
            left: a.n,
            right: b.n,
        })
    }
}

fn zip_with(
    a: &Matrix,
    b: &Matrix,
    op: impl Fn(Element, Element) -> Element,
) -> Result<Matrix, MatrixError> {
    ensure_same_size(a, b)?;
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&x, &y)| op(x, y))
        .collect();
    Ok(Matrix { n: a.n, data })
}

/// Element-wise `a + b`.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    zip_with(a, b, Element::wrapping_add)
}

/// Element-wise `a - b`.
pub fn sub(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    zip_with(a, b, Element::wrapping_sub)
}

/// Split an even-sized matrix into its four quadrants.
pub fn split(a: &Matrix) -> Result<Quadrants, MatrixError> {
    let n = a.n;
    if n % 2 != 0 {
        return Err(MatrixError::shape(
            "operand",
            format!("cannot split a matrix of odd size {n}"),
        ));
    }
    let mid = n / 2;
    let quadrant = |row0: usize, col0: usize| {
        let mut data = Vec::with_capacity(mid * mid);
        for i in row0..row0 + mid {
            let start = i * n + col0;
            data.extend_from_slice(&a.data[start..start + mid]);
        }
        Matrix { n: mid, data }
    };
    Ok((
        quadrant(0, 0),
        quadrant(0, mid),
        quadrant(mid, 0),
        quadrant(mid, mid),
    ))
}

/// Reassemble four equally sized quadrants into one matrix.
pub fn combine(
    c11: &Matrix,
    c12: &Matrix,
    c21: &Matrix,
    c22: &Matrix,
) -> Result<Matrix, MatrixError> {
    ensure_same_size(c11, c12)?;
    ensure_same_size(c11, c21)?;
    ensure_same_size(c11, c22)?;

    let mid = c11.n;
    let n = mid * 2;
    let mut data = Vec::with_capacity(n * n);
    for (left, right) in [(c11, c12), (c21, c22)] {
        for i in 0..mid {
            data.extend_from_slice(left.row(i));
            data.extend_from_slice(right.row(i));
        }
    }
    Ok(Matrix { n, data })
}

/// Smallest power of two `>= n` (1 for `n <= 1`).
#[must_use]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Embed `a` into the top-left corner of an `m x m` zero matrix.
pub fn pad_to_size(a: &Matrix, m: usize) -> Result<Matrix, MatrixError> {
    if m < a.n {
        return Err(MatrixError::SizeMismatch { left: a.n, right: m });
    }
    if m == a.n {
        return Ok(a.clone());
    }
    let mut padded = Matrix::zeros(m);
    for (i, row) in a.rows().enumerate() {
        padded.data[i * m..i * m + a.n].copy_from_slice(row);
    }
    Ok(padded)
}

/// Top-left `n x n` sub-matrix of `a`.
pub fn crop(a: &Matrix, n: usize) -> Result<Matrix, MatrixError> {
    if n == 0 {
        return Err(MatrixError::shape("operand", "cannot crop to size 0"));
    }
    if n > a.n {
        return Err(MatrixError::SizeMismatch { left: a.n, right: n });
    }
    let mut data = Vec::with_capacity(n * n);
    for row in a.rows().take(n) {
        data.extend_from_slice(&row[..n]);
    }
    Ok(Matrix { n, data })
}

/// Check that `rows` describes a non-empty square matrix and return its size.
pub fn assert_square(rows: &[Vec<Element>], name: &str) -> Result<usize, MatrixError> {
    let n = rows.len();
    if n == 0 {
        return Err(MatrixError::shape(name, "has no rows"));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(MatrixError::shape(
            name,
            format!("row {i} has {} elements, expected {n}", row.len()),
        ));
    }
    Ok(n)
}
