//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs, to_sprs};
