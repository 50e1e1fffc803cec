//! # sparse-algebra: a dual-representation sparse matrix
//!
//! A [`SparseMatrix`] stores its non-zero entries either as an ordered
//! coordinate map (cheap to build and modify) or in compressed per-lane form
//! (CSR for row-major, CSC for column-major). The storage order is a type
//! parameter fixed at construction.
//!
//! ## Overview
//!
//! - **Container**: element read/write, compress/uncompress, resize, dense
//!   printing.
//! - **Linear algebra**: matrix-vector and matrix-matrix products, one,
//!   infinity and Frobenius norms. All work on either representation without
//!   converting it.
//! - **Matrix Market**: loading (and writing) the sparse coordinate text
//!   format.
//!
//! ## Usage
//!
//! ```
//! use sparse_algebra::{NormKind, RowMajor, SparseError, SparseMatrix};
//!
//! let mut m = SparseMatrix::<f64, RowMajor>::from_triplets([(0, 0, 1.2), (1, 2, -3.4), (2, 1, 5.6)]);
//! *m.write(2, 0).unwrap() = 7.8;
//!
//! m.compress();
//! *m.write(2, 1).unwrap() = -2.5;
//! assert!(matches!(m.write(0, 1), Err(SparseError::CannotInsertIntoCompressed { .. })));
//!
//! m.uncompress().unwrap();
//! *m.write(0, 1).unwrap() = 3.25;
//!
//! let y = m.mul_vec(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(y.len(), 3);
//! assert!(m.norm(NormKind::Frobenius) > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod matrix_market;
pub mod scalar;
pub mod utils;

// Re-export primary components
pub use config::{DuplicatePolicy, MatrixMarketConfig};
pub use error::{Result, SparseError};
pub use linalg::NormKind;
pub use matrix::{ColumnMajor, CompressedStorage, RowMajor, SparseMatrix, StorageOrder};
pub use matrix_market::{load, load_into, MatrixMarketIO};
pub use scalar::Scalar;
pub use utils::{from_sprs, to_sprs};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
