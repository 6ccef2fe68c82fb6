//! Dense linear algebra for small systems
//!
//! Shape-checked matrix and vector products plus a Gauss-Jordan solver
//! with partial pivoting. Sizes here are tiny (the conic fit uses a 5x5
//! normal matrix), so everything is a plain row-major `Vec<f64>`.
//!
//! Products are split by operand kind instead of dispatching on shape at
//! run time:
//!
//! | operation | function |
//! |---|---|
//! | matrix x matrix | [`Matrix::mul`] |
//! | matrix x vector | [`Matrix::mul_vec`] |
//! | vector . vector | [`dot`] |

use crate::error::{Error, Result};
use std::ops::Index;

/// Relative pivot tolerance for [`gauss_solve`].
///
/// A pivot is treated as zero when its magnitude is at most this fraction
/// of the largest absolute entry of the input matrix.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Non-empty rectangular matrix of `f64`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyMatrix`] if there are no rows or the rows are empty
    /// - [`Error::RaggedMatrix`] if the rows differ in length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(Error::EmptyMatrix);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedMatrix {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a `rows x cols` matrix of zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMatrix`] if either dimension is 0.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMatrix);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows()`.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Rows and columns swapped.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self[(r, c)]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] unless `self.cols() == rhs.rows()`.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch {
                op: "Matrix::mul",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut data = vec![0.0; self.rows * rhs.cols];
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                for j in 0..rhs.cols {
                    data[i * rhs.cols + j] += a * rhs[(k, j)];
                }
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    /// Matrix-vector product `self * v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] unless `v.len() == self.cols()`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols {
            return Err(Error::ShapeMismatch {
                op: "Matrix::mul_vec",
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        Ok((0..self.rows)
            .map(|r| self.row(r).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

/// Transpose of `m`.
pub fn transpose(m: &Matrix) -> Matrix {
    m.transpose()
}

/// Inner product of two vectors of equal length.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the lengths differ.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            op: "dot",
            left: (1, a.len()),
            right: (b.len(), 1),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Solve `a * x = b` by Gauss-Jordan elimination with partial pivoting.
///
/// The augmented matrix `[a | b]` is reduced all the way to reduced row
/// echelon form, so `x` is read straight off the last column.
///
/// # Errors
///
/// - [`Error::ShapeMismatch`] if `a` is not square or `b` has the wrong length
/// - [`Error::SingularMatrix`] if a pivot is zero relative to the matrix
///   scale (see [`PIVOT_EPSILON`])
pub fn gauss_solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    let n = a.rows();
    if a.cols() != n || b.len() != n {
        return Err(Error::ShapeMismatch {
            op: "gauss_solve",
            left: a.shape(),
            right: (b.len(), 1),
        });
    }

    let tol = PIVOT_EPSILON * a.max_abs();
    let mut m: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = a.row(i).to_vec();
            row.push(b[i]);
            row
        })
        .collect();

    for col in 0..n {
        // Partial pivoting: largest magnitude at or below the diagonal
        let mut pivot = col;
        for r in col + 1..n {
            if m[r][col].abs() > m[pivot][col].abs() {
                pivot = r;
            }
        }
        m.swap(col, pivot);

        let diag = m[col][col];
        if !diag.is_finite() || diag.abs() <= tol {
            return Err(Error::SingularMatrix { column: col, pivot: diag });
        }
        for v in &mut m[col] {
            *v /= diag;
        }

        let col_vals = m[col].clone();
        for (row, m_row) in m.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let factor = m_row[col];
            if factor == 0.0 {
                continue;
            }
            for (rv, &cv) in m_row.iter_mut().zip(col_vals.iter()) {
                *rv -= cv * factor;
            }
        }
    }

    Ok(m.into_iter().map(|row| row[n]).collect())
}
