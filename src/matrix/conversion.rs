//! Conversions between storage orders and to dense arrays

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::matrix::order::StorageOrder;
use crate::matrix::sparse::{SparseMatrix, Storage};
use crate::scalar::Scalar;

impl<T: Scalar, O: StorageOrder> SparseMatrix<T, O> {
    /// Returns the same logical matrix stored in order `O2`
    ///
    /// The representation is preserved: a compressed matrix yields a
    /// compressed result (its lanes transposed when the orders differ), an
    /// uncompressed one an uncompressed result.
    pub fn to_order<O2: StorageOrder>(&self) -> SparseMatrix<T, O2> {
        let storage = match &self.storage {
            Storage::Uncompressed(elements) => {
                let remapped: BTreeMap<_, _> = elements
                    .iter()
                    .map(|(&(p, s), &v)| {
                        let (row, col) = O::coords(p, s);
                        (O2::key(row, col), v)
                    })
                    .collect();
                Storage::Uncompressed(remapped)
            }
            Storage::Compressed(compressed) if O::PRIMARY_IS_ROW == O2::PRIMARY_IS_ROW => {
                Storage::Compressed(compressed.clone())
            }
            Storage::Compressed(compressed) => {
                Storage::Compressed(compressed.transpose(self.secondary_dim()))
            }
        };

        SparseMatrix::from_storage(self.rows, self.cols, storage)
    }

    /// Dense `rows × cols` copy, absent entries filled with zero
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.rows, self.cols), T::zero());
        for (row, col, &value) in self.iter() {
            dense[[row, col]] = value;
        }
        dense
    }
}
