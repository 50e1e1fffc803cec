//! Configuration for the Matrix Market reader

/// How repeated coordinates in an input file are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Later entries replace earlier ones
    #[default]
    Overwrite,
    /// Values at the same coordinate are summed
    Sum,
}

/// Options for [`MatrixMarketIO`](crate::MatrixMarketIO)
#[derive(Debug, Clone, Default)]
pub struct MatrixMarketConfig {
    /// Handling of repeated coordinates
    pub duplicates: DuplicatePolicy,

    /// Require the number of entry lines to equal the declared non-zero count
    pub check_entry_count: bool,
}

impl MatrixMarketConfig {
    /// Config with the given duplicate policy
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Config that enforces (or not) the declared entry count
    pub fn with_entry_count_check(mut self, check: bool) -> Self {
        self.check_entry_count = check;
        self
    }
}
