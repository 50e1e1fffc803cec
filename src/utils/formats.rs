//! Utilities for converting between our matrix container and sprs

use sprs::CsMat;

use crate::matrix::compressed::CompressedStorage;
use crate::matrix::order::StorageOrder;
use crate::matrix::sparse::{SparseMatrix, Storage};
use crate::scalar::Scalar;

/// Converts our matrix to a sprs `CsMat`
///
/// Row-major matrices become CSR, column-major matrices CSC. An uncompressed
/// matrix is packed on the fly; the input is not modified.
pub fn to_sprs<T, O>(matrix: &SparseMatrix<T, O>) -> CsMat<T>
where
    T: Scalar + Default,
    O: StorageOrder,
{
    let compressed = match &matrix.storage {
        Storage::Compressed(compressed) => compressed.clone(),
        Storage::Uncompressed(elements) => CompressedStorage::from_sorted(
            matrix.primary_dim(),
            elements.iter().map(|(&(p, s), &v)| (p, s, v)),
        ),
    };
    let shape = matrix.shape();
    let CompressedStorage {
        outer_ptr,
        inner_idx,
        values,
    } = compressed;

    if O::PRIMARY_IS_ROW {
        CsMat::new(shape, outer_ptr, inner_idx, values)
    } else {
        CsMat::new_csc(shape, outer_ptr, inner_idx, values)
    }
}

/// Converts a sprs `CsMat` into our matrix, in compressed form
///
/// The sprs storage is converted first if it does not match `O`.
pub fn from_sprs<T, O>(matrix: CsMat<T>) -> SparseMatrix<T, O>
where
    T: Scalar + Default,
    O: StorageOrder,
{
    // Ensure the sprs storage matches our lane layout
    let matrix = match (O::PRIMARY_IS_ROW, matrix.is_csr()) {
        (true, false) => matrix.to_csr(),
        (false, true) => matrix.to_csc(),
        _ => matrix,
    };

    let (rows, cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrix::from_storage(
        rows,
        cols,
        Storage::Compressed(CompressedStorage::new(indptr, indices, data)),
    )
}
