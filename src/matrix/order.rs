//! Storage orders
//!
//! The order fixes which axis is *primary*: coordinate keys are stored as
//! `(primary, secondary)` so that the natural ordering of the key tuple groups
//! all entries of one row (row-major) or one column (column-major) together.

use std::fmt::Debug;
use std::ops::Range;

/// Compile-time storage order policy
pub trait StorageOrder: Copy + Default + Debug + PartialEq + 'static {
    /// Whether rows are the primary axis
    const PRIMARY_IS_ROW: bool;

    /// Human readable name
    const NAME: &'static str;

    /// Map a `(row, col)` coordinate to its `(primary, secondary)` key
    #[inline]
    fn key(row: usize, col: usize) -> (usize, usize) {
        if Self::PRIMARY_IS_ROW {
            (row, col)
        } else {
            (col, row)
        }
    }

    /// Inverse of [`StorageOrder::key`]
    #[inline]
    fn coords(primary: usize, secondary: usize) -> (usize, usize) {
        if Self::PRIMARY_IS_ROW {
            (primary, secondary)
        } else {
            (secondary, primary)
        }
    }

    /// Length of the primary axis for a `rows × cols` matrix
    #[inline]
    fn primary_dim(rows: usize, cols: usize) -> usize {
        if Self::PRIMARY_IS_ROW {
            rows
        } else {
            cols
        }
    }

    /// Length of the secondary axis for a `rows × cols` matrix
    #[inline]
    fn secondary_dim(rows: usize, cols: usize) -> usize {
        if Self::PRIMARY_IS_ROW {
            cols
        } else {
            rows
        }
    }

    /// Key range covering every entry of one primary index
    ///
    /// Both bounds are synthetic keys: `(p, 0)` is the lower bound of lane `p`
    /// and `(p + 1, 0)` the lower bound of the next one.
    #[inline]
    fn lane_bounds(primary: usize) -> Range<(usize, usize)> {
        (primary, 0)..(primary + 1, 0)
    }
}

/// Rows are primary: entries ordered by row, then column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Columns are primary: entries ordered by column, then row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMajor;

impl StorageOrder for RowMajor {
    const PRIMARY_IS_ROW: bool = true;
    const NAME: &'static str = "row-major";
}

impl StorageOrder for ColumnMajor {
    const PRIMARY_IS_ROW: bool = false;
    const NAME: &'static str = "column-major";
}
