// Sparse matrix container, storage orders and format conversions

pub mod compressed;
pub mod conversion;
pub mod order;
pub mod sparse;

pub use compressed::CompressedStorage;
pub use order::{ColumnMajor, RowMajor, StorageOrder};
pub use sparse::SparseMatrix;
