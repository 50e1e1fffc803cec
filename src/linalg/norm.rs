//! Matrix norms

use num_traits::{Float, Zero};

use crate::matrix::order::StorageOrder;
use crate::matrix::sparse::SparseMatrix;
use crate::scalar::Scalar;

/// Which matrix norm to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    /// Maximum absolute column sum
    One,
    /// Maximum absolute row sum
    Infinity,
    /// Square root of the sum of squared moduli
    Frobenius,
}

impl<T: Scalar, O: StorageOrder> SparseMatrix<T, O> {
    /// Computes the requested norm
    ///
    /// The result depends only on the logical matrix, not on the storage
    /// order or on whether the matrix is compressed. An empty matrix has
    /// norm zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_algebra::{NormKind, SparseMatrix, RowMajor};
    ///
    /// let a = SparseMatrix::<f64, RowMajor>::from_triplets([(0, 0, 1.0), (0, 1, -2.0), (1, 0, 3.0)]);
    /// assert_eq!(a.norm(NormKind::One), 4.0);
    /// assert_eq!(a.norm(NormKind::Infinity), 3.0);
    /// ```
    pub fn norm(&self, kind: NormKind) -> T::Real {
        match kind {
            // Column sums: lanes when columns are primary, otherwise an
            // accumulator per column.
            NormKind::One if O::PRIMARY_IS_ROW => self.max_cross_sum(),
            NormKind::One => self.max_lane_sum(),
            NormKind::Infinity if O::PRIMARY_IS_ROW => self.max_lane_sum(),
            NormKind::Infinity => self.max_cross_sum(),
            NormKind::Frobenius => self.frobenius(),
        }
    }

    /// Largest sum of moduli over a single lane
    fn max_lane_sum(&self) -> T::Real {
        let zero = <T::Real as Zero>::zero();
        (0..self.primary_dim())
            .map(|p| self.lane(p).fold(zero, |acc, (_, &v)| acc + v.modulus()))
            .fold(zero, nan_max)
    }

    /// Largest sum of moduli over a secondary index, across all lanes
    fn max_cross_sum(&self) -> T::Real {
        let zero = <T::Real as Zero>::zero();
        let mut sums = vec![zero; self.secondary_dim()];
        for p in 0..self.primary_dim() {
            for (s, &v) in self.lane(p) {
                sums[s] += v.modulus();
            }
        }
        sums.into_iter().fold(zero, nan_max)
    }

    fn frobenius(&self) -> T::Real {
        self.iter()
            .fold(<T::Real as Zero>::zero(), |acc, (_, _, &v)| acc + v.modulus_sqr())
            .sqrt()
    }
}

/// Maximum that keeps NaN once seen, unlike `Float::max`
fn nan_max<R: Float>(acc: R, x: R) -> R {
    if acc.is_nan() || x.is_nan() {
        R::nan()
    } else if x > acc {
        x
    } else {
        acc
    }
}
