//! Error types for sparse matrix operations

use thiserror::Error;

/// Result type alias using the crate's error
pub type Result<T> = std::result::Result<T, SparseError>;

/// Errors raised by the sparse container, its products and the file loader
#[derive(Error, Debug)]
pub enum SparseError {
    /// Coordinate outside the declared dimensions
    #[error("index ({row}, {col}) out of range for a {rows} × {cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// No explicitly stored element at the coordinate
    #[error("no stored element at ({row}, {col})")]
    ElementNotFound { row: usize, col: usize },

    /// Structural insertion attempted while the matrix is compressed
    #[error("cannot insert ({row}, {col}) into a compressed matrix, uncompress first")]
    CannotInsertIntoCompressed { row: usize, col: usize },

    /// `uncompress` called on a matrix that is not compressed
    #[error("matrix is not compressed")]
    NotCompressed,

    /// Operand length or shape disagrees with the matrix dimensions
    #[error("dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    /// Input is not in Matrix Market format
    #[error("bad format: {0}")]
    BadFormat(String),

    /// Malformed line in a Matrix Market file (1-based line number)
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SparseError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        SparseError::Parse {
            line,
            message: message.into(),
        }
    }
}
