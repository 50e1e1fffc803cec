//! Matrix-vector and matrix-matrix products
//!
//! All products read the active representation directly; neither operand is
//! converted or otherwise modified.

use std::collections::BTreeMap;
use std::ops::Mul;

use crate::error::{Result, SparseError};
use crate::matrix::order::StorageOrder;
use crate::matrix::sparse::SparseMatrix;
use crate::scalar::Scalar;

impl<T: Scalar, O: StorageOrder> SparseMatrix<T, O> {
    /// Computes `y = A x` for a dense vector `x` of length `cols`
    ///
    /// Row-major lanes are accumulated one row at a time; column-major lanes
    /// scatter their contribution `x[col] * A[:, col]` into `y`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_algebra::{SparseMatrix, ColumnMajor};
    ///
    /// let a = SparseMatrix::<f64, ColumnMajor>::from_triplets([(0, 0, 2.0), (1, 1, 3.0)]);
    /// assert_eq!(a.mul_vec(&[1.0, 2.0]).unwrap(), vec![2.0, 6.0]);
    /// ```
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        if x.len() != self.cols {
            return Err(SparseError::DimensionMismatch {
                operation: "matrix-vector product",
                expected: self.cols,
                found: x.len(),
            });
        }

        let mut y = vec![T::zero(); self.rows];
        for p in 0..self.primary_dim() {
            if O::PRIMARY_IS_ROW {
                let mut row_sum = T::zero();
                for (col, &value) in self.lane(p) {
                    row_sum += value * x[col];
                }
                y[p] = row_sum;
            } else {
                let x_col = x[p];
                for (row, &value) in self.lane(p) {
                    y[row] += value * x_col;
                }
            }
        }
        Ok(y)
    }

    /// Multiplies by a `cols × 1` sparse matrix used as a column vector
    ///
    /// The operand may be in either order and either representation; its
    /// entries are gathered into a private map keyed by row, so the caller's
    /// matrix is left exactly as it was.
    pub fn mul_column<O2: StorageOrder>(&self, column: &SparseMatrix<T, O2>) -> Result<Vec<T>> {
        if column.cols() != 1 {
            return Err(SparseError::DimensionMismatch {
                operation: "matrix-column product (operand columns)",
                expected: 1,
                found: column.cols(),
            });
        }
        if column.rows() != self.cols {
            return Err(SparseError::DimensionMismatch {
                operation: "matrix-column product (operand rows)",
                expected: self.cols,
                found: column.rows(),
            });
        }

        let entries: BTreeMap<usize, T> = column.iter().map(|(row, _, &v)| (row, v)).collect();

        let mut y = vec![T::zero(); self.rows];
        for (row, col, &value) in self.iter() {
            if let Some(&x) = entries.get(&col) {
                y[row] += value * x;
            }
        }
        Ok(y)
    }

    /// General sparse product `A B`, returned uncompressed in order `O`
    ///
    /// Entries of `B` are grouped by row once, then each stored `A[i, k]`
    /// scatters `A[i, k] * B[k, :]` into an accumulator map. Entries that
    /// cancel to exactly zero are dropped.
    pub fn matmul<O2: StorageOrder>(&self, other: &SparseMatrix<T, O2>) -> Result<SparseMatrix<T, O>> {
        if self.cols != other.rows() {
            return Err(SparseError::DimensionMismatch {
                operation: "matrix-matrix product",
                expected: self.cols,
                found: other.rows(),
            });
        }

        let mut b_rows: Vec<Vec<(usize, T)>> = vec![Vec::new(); other.rows()];
        for (k, j, &v) in other.iter() {
            b_rows[k].push((j, v));
        }

        let mut accum: BTreeMap<(usize, usize), T> = BTreeMap::new();
        for (i, k, &a_val) in self.iter() {
            for &(j, b_val) in &b_rows[k] {
                *accum.entry(O::key(i, j)).or_insert_with(T::zero) += a_val * b_val;
            }
        }
        accum.retain(|_, v| !v.is_zero());

        let mut product = SparseMatrix::new(self.rows, other.cols());
        for ((p, s), v) in accum {
            let (row, col) = O::coords(p, s);
            product.set(row, col, v)?;
        }
        Ok(product)
    }
}

impl<'a, T: Scalar, O: StorageOrder> Mul<&'a [T]> for &'a SparseMatrix<T, O> {
    type Output = Result<Vec<T>>;

    fn mul(self, x: &'a [T]) -> Self::Output {
        self.mul_vec(x)
    }
}

impl<'a, T: Scalar, O: StorageOrder> Mul<&'a Vec<T>> for &'a SparseMatrix<T, O> {
    type Output = Result<Vec<T>>;

    fn mul(self, x: &'a Vec<T>) -> Self::Output {
        self.mul_vec(x)
    }
}

impl<'a, T: Scalar, O: StorageOrder, O2: StorageOrder> Mul<&'a SparseMatrix<T, O2>>
    for &'a SparseMatrix<T, O>
{
    type Output = Result<Vec<T>>;

    fn mul(self, column: &'a SparseMatrix<T, O2>) -> Self::Output {
        self.mul_column(column)
    }
}
