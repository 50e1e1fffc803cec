//! Linear algebra on sparse matrices: products and norms
//!
//! Every operation reads whichever representation is active, so callers never
//! need to compress or uncompress before using them.

pub mod norm;
pub mod product;

pub use norm::NormKind;
