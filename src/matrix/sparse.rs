//! Sparse matrix container with a coordinate map and a compressed form
//!
//! A [`SparseMatrix`] always holds exactly one of two representations:
//!
//! - **Uncompressed**: an ordered map from `(primary, secondary)` keys to
//!   values. Cheap to insert into, ordered so that every row (row-major) or
//!   column (column-major) is a contiguous key range.
//! - **Compressed**: per-lane sorted `(secondary, value)` lists packed into
//!   CSR/CSC arrays. Existing entries may be modified in place but no new
//!   entries can be inserted.
//!
//! Absent entries are the zero of the scalar type.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use log::debug;

use crate::error::{Result, SparseError};
use crate::matrix::compressed::{CompressedStorage, PackedLane};
use crate::matrix::order::{RowMajor, StorageOrder};
use crate::scalar::Scalar;

/// Active representation of a [`SparseMatrix`]
#[derive(Clone, Debug)]
pub(crate) enum Storage<T> {
    Uncompressed(BTreeMap<(usize, usize), T>),
    Compressed(CompressedStorage<T>),
}

/// A sparse `rows × cols` matrix stored in order `O`
#[derive(Clone)]
pub struct SparseMatrix<T, O = RowMajor> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) storage: Storage<T>,
    _order: PhantomData<O>,
}

/// Entries of one lane as `(secondary, &value)`, in either representation
pub(crate) enum Lane<'a, T> {
    Map(btree_map::Range<'a, (usize, usize), T>),
    Packed(PackedLane<'a, T>),
}

impl<'a, T> Iterator for Lane<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Lane::Map(range) => range.next().map(|(&(_, s), v)| (s, v)),
            Lane::Packed(packed) => packed.next().map(|(&s, v)| (s, v)),
        }
    }
}

impl<T: Scalar, O: StorageOrder> SparseMatrix<T, O> {
    /// Creates an empty, uncompressed `rows × cols` matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_storage(rows, cols, Storage::Uncompressed(BTreeMap::new()))
    }

    pub(crate) fn from_storage(rows: usize, cols: usize, storage: Storage<T>) -> Self {
        Self {
            rows,
            cols,
            storage,
            _order: PhantomData,
        }
    }

    /// Creates an uncompressed matrix from `(row, col, value)` triples
    ///
    /// Dimensions are inferred as the largest index plus one. A repeated
    /// coordinate keeps the last value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_algebra::{SparseMatrix, RowMajor};
    ///
    /// let m = SparseMatrix::<f64, RowMajor>::from_triplets([(0, 0, 1.2), (1, 2, -3.4), (2, 1, 5.6)]);
    /// assert_eq!(m.shape(), (3, 3));
    /// assert_eq!(m.read(0, 1).unwrap(), 0.0);
    /// ```
    pub fn from_triplets<I>(triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut rows = 0;
        let mut cols = 0;
        let mut elements = BTreeMap::new();

        for (row, col, value) in triplets {
            rows = rows.max(row.saturating_add(1));
            cols = cols.max(col.saturating_add(1));
            elements.insert(O::key(row, col), value);
        }

        Self::from_storage(rows, cols, Storage::Uncompressed(elements))
    }

    /// Creates an uncompressed matrix with explicit dimensions
    ///
    /// Fails with [`SparseError::IndexOutOfRange`] if a triple falls outside.
    pub fn from_triplets_with_shape<I>(rows: usize, cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(rows, cols);
        for (row, col, value) in triplets {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of explicitly stored entries
    pub fn nnz(&self) -> usize {
        match &self.storage {
            Storage::Uncompressed(elements) => elements.len(),
            Storage::Compressed(compressed) => compressed.nnz(),
        }
    }

    /// Whether the compressed representation is active
    pub fn is_compressed(&self) -> bool {
        matches!(self.storage, Storage::Compressed(_))
    }

    /// Number of lanes (rows for row-major, columns for column-major)
    pub fn primary_dim(&self) -> usize {
        O::primary_dim(self.rows, self.cols)
    }

    /// Length of each lane
    pub fn secondary_dim(&self) -> usize {
        O::secondary_dim(self.rows, self.cols)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(SparseError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Value at `(row, col)`; zero when nothing is stored there
    ///
    /// Absent entries read as zero in both representations.
    pub fn read(&self, row: usize, col: usize) -> Result<T> {
        match self.stored(row, col) {
            Ok(value) => Ok(*value),
            Err(SparseError::ElementNotFound { .. }) => Ok(T::zero()),
            Err(e) => Err(e),
        }
    }

    /// Reference to the explicitly stored entry at `(row, col)`
    ///
    /// Fails with [`SparseError::ElementNotFound`] when the coordinate is in
    /// range but holds no stored entry.
    pub fn stored(&self, row: usize, col: usize) -> Result<&T> {
        self.check_bounds(row, col)?;
        let (p, s) = O::key(row, col);

        let found = match &self.storage {
            Storage::Uncompressed(elements) => elements.get(&(p, s)),
            Storage::Compressed(compressed) => compressed.get(p, s),
        };
        found.ok_or(SparseError::ElementNotFound { row, col })
    }

    /// Mutable slot for `(row, col)`
    ///
    /// Uncompressed, a zero entry is inserted if the slot is absent.
    /// Compressed, only already stored entries can be reached; any other
    /// coordinate fails with [`SparseError::CannotInsertIntoCompressed`].
    pub fn write(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.check_bounds(row, col)?;
        let (p, s) = O::key(row, col);

        match &mut self.storage {
            Storage::Uncompressed(elements) => Ok(elements.entry((p, s)).or_insert_with(T::zero)),
            Storage::Compressed(compressed) => compressed
                .get_mut(p, s)
                .ok_or(SparseError::CannotInsertIntoCompressed { row, col }),
        }
    }

    /// Assigns `value` at `(row, col)`, see [`SparseMatrix::write`]
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        *self.write(row, col)? = value;
        Ok(())
    }

    /// Switches to the compressed representation
    ///
    /// Does nothing if already compressed. The coordinate map is consumed,
    /// so the data is never held twice.
    pub fn compress(&mut self) {
        let n_outer = self.primary_dim();
        let storage = std::mem::replace(&mut self.storage, Storage::Uncompressed(BTreeMap::new()));

        self.storage = match storage {
            Storage::Uncompressed(elements) => {
                let compressed = CompressedStorage::from_sorted(
                    n_outer,
                    elements.into_iter().map(|((p, s), v)| (p, s, v)),
                );
                debug!(
                    "compressed {} × {} {} matrix ({} entries)",
                    self.rows,
                    self.cols,
                    O::NAME,
                    compressed.nnz()
                );
                Storage::Compressed(compressed)
            }
            compressed @ Storage::Compressed(_) => compressed,
        };
    }

    /// Switches back to the coordinate map
    ///
    /// Fails with [`SparseError::NotCompressed`] if already uncompressed.
    pub fn uncompress(&mut self) -> Result<()> {
        if !self.is_compressed() {
            return Err(SparseError::NotCompressed);
        }

        let storage = std::mem::replace(&mut self.storage, Storage::Uncompressed(BTreeMap::new()));
        if let Storage::Compressed(compressed) = storage {
            let elements: BTreeMap<_, _> = compressed
                .into_entries()
                .map(|(p, s, v)| ((p, s), v))
                .collect();
            debug!(
                "uncompressed {} × {} {} matrix ({} entries)",
                self.rows,
                self.cols,
                O::NAME,
                elements.len()
            );
            self.storage = Storage::Uncompressed(elements);
        }
        Ok(())
    }

    /// Discards all entries, sets new dimensions, and leaves the matrix
    /// uncompressed
    pub fn resize(&mut self, rows: usize, cols: usize) {
        debug!(
            "resizing {} × {} matrix to {} × {}",
            self.rows, self.cols, rows, cols
        );
        self.rows = rows;
        self.cols = cols;
        self.storage = Storage::Uncompressed(BTreeMap::new());
    }

    /// Entries of lane `p` as `(secondary, &value)`, increasing `secondary`
    ///
    /// Uncompressed, the lane is the key range between the synthetic bounds
    /// `(p, 0)` and `(p + 1, 0)`.
    pub(crate) fn lane(&self, p: usize) -> Lane<'_, T> {
        match &self.storage {
            Storage::Uncompressed(elements) => Lane::Map(elements.range(O::lane_bounds(p))),
            Storage::Compressed(compressed) => Lane::Packed(compressed.lane(p)),
        }
    }

    /// Iterates stored entries as `(row, col, &value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.primary_dim()).flat_map(move |p| {
            self.lane(p).map(move |(s, v)| {
                let (row, col) = O::coords(p, s);
                (row, col, v)
            })
        })
    }

    /// Writes the dense grid to standard output
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        println!("{}", self);
    }
}

impl<T: Scalar, O: StorageOrder> Default for SparseMatrix<T, O> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T: Scalar, O: StorageOrder> PartialEq for SparseMatrix<T, O> {
    /// Logical equality: same shape and same stored entries, whatever the
    /// representation
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl<T: Scalar + fmt::Display, O: StorageOrder> fmt::Display for SparseMatrix<T, O> {
    /// Dense `rows × cols` grid, absent entries shown as `0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dense = self.to_dense();
        let stored: Vec<Vec<bool>> = {
            let mut mask = vec![vec![false; self.cols]; self.rows];
            for (row, col, _) in self.iter() {
                mask[row][col] = true;
            }
            mask
        };

        for (i, row) in dense.outer_iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                if stored[i][j] {
                    write!(f, "{}", value)?;
                } else {
                    write!(f, "0")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug, O: StorageOrder> fmt::Debug for SparseMatrix<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.rows, self.cols)?;
        writeln!(f, "  order: {}", O::NAME)?;
        match &self.storage {
            Storage::Uncompressed(elements) => {
                writeln!(f, "  uncompressed, nnz: {}", elements.len())?;
                for (&(p, s), v) in elements.iter().take(10) {
                    let (row, col) = O::coords(p, s);
                    writeln!(f, "    ({}, {}) = {:?}", row, col, v)?;
                }
                if elements.len() > 10 {
                    writeln!(f, "    ... ({} more)", elements.len() - 10)?;
                }
            }
            Storage::Compressed(compressed) => {
                writeln!(f, "  compressed: {:?}", compressed)?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::order::ColumnMajor;

    fn sample<O: StorageOrder>() -> SparseMatrix<f64, O> {
        SparseMatrix::from_triplets([(0, 0, 1.2), (1, 2, -3.4), (2, 1, 5.6)])
    }

    #[test]
    fn test_from_triplets_infers_shape() {
        let m = SparseMatrix::<i32, RowMajor>::from_triplets([(0, 4, 1), (2, 1, 2)]);
        assert_eq!(m.shape(), (3, 5));
        assert_eq!(m.nnz(), 2);
        assert!(!m.is_compressed());
    }

    #[test]
    fn test_from_triplets_largest_index() {
        let m = SparseMatrix::<f64, ColumnMajor>::from_triplets([(usize::MAX, 0, 1.0)]);
        assert_eq!(m.shape(), (usize::MAX, 1));
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_from_triplets_with_shape_rejects_outside() {
        let result = SparseMatrix::<f64, RowMajor>::from_triplets_with_shape(2, 2, [(2, 0, 1.0)]);
        assert!(matches!(
            result,
            Err(SparseError::IndexOutOfRange { row: 2, col: 0, .. })
        ));
    }

    #[test]
    fn test_read_absent_is_zero() {
        let m = sample::<RowMajor>();
        assert_eq!(m.read(0, 0).unwrap(), 1.2);
        assert_eq!(m.read(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_read_out_of_range() {
        let m = sample::<ColumnMajor>();
        assert!(matches!(
            m.read(3, 0),
            Err(SparseError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            m.read(0, 3),
            Err(SparseError::IndexOutOfRange { .. })
        ));
    }

    fn stored_signals_missing<O: StorageOrder>() {
        let mut m = sample::<O>();
        assert!(matches!(
            m.stored(0, 1),
            Err(SparseError::ElementNotFound { row: 0, col: 1 })
        ));
        m.compress();
        assert!(matches!(
            m.stored(0, 1),
            Err(SparseError::ElementNotFound { row: 0, col: 1 })
        ));
        assert_eq!(*m.stored(2, 1).unwrap(), 5.6);
    }

    #[test]
    fn test_stored_signals_missing() {
        stored_signals_missing::<RowMajor>();
        stored_signals_missing::<ColumnMajor>();
    }

    #[test]
    fn test_compressed_write_existing_only() {
        let mut m = sample::<RowMajor>();
        m.compress();

        *m.write(2, 1).unwrap() = -2.5;
        assert_eq!(m.read(2, 1).unwrap(), -2.5);

        assert!(matches!(
            m.write(0, 1),
            Err(SparseError::CannotInsertIntoCompressed { row: 0, col: 1 })
        ));
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_compress_is_idempotent() {
        let mut m = sample::<ColumnMajor>();
        m.compress();
        let once = m.clone();
        m.compress();
        assert!(m.is_compressed());
        assert_eq!(m, once);
    }

    #[test]
    fn test_uncompress_requires_compressed() {
        let mut m = sample::<RowMajor>();
        assert!(matches!(m.uncompress(), Err(SparseError::NotCompressed)));
    }

    #[test]
    fn test_resize_discards_and_uncompresses() {
        let mut m = sample::<RowMajor>();
        m.compress();
        m.resize(4, 2);

        assert_eq!(m.shape(), (4, 2));
        assert_eq!(m.nnz(), 0);
        assert!(!m.is_compressed());
        assert_eq!(m.read(3, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_iter_follows_storage_order() {
        let rm: Vec<_> = sample::<RowMajor>().iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(rm, vec![(0, 0), (1, 2), (2, 1)]);

        let mut cm = sample::<ColumnMajor>();
        cm.compress();
        let cm: Vec<_> = cm.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cm, vec![(0, 0), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_lane_in_both_representations() {
        let mut m = SparseMatrix::<i32, RowMajor>::from_triplets([(1, 3, 4), (1, 0, 2), (0, 1, 9)]);
        let lane: Vec<_> = m.lane(1).map(|(s, &v)| (s, v)).collect();
        assert_eq!(lane, vec![(0, 2), (3, 4)]);

        m.compress();
        let lane: Vec<_> = m.lane(1).map(|(s, &v)| (s, v)).collect();
        assert_eq!(lane, vec![(0, 2), (3, 4)]);
    }

    #[test]
    fn test_display_dense_grid() {
        let m = SparseMatrix::<i32, ColumnMajor>::from_triplets([(0, 0, 1), (1, 2, -3)]);
        assert_eq!(m.to_string(), "1 0 0\n0 0 -3\n");
    }
}
