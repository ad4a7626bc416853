use thiserror::Error;

/// Errors returned while building or fitting a k-centroid model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The input matrix has no records or no columns.
    #[error("empty input")]
    EmptyInput,

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_records} records")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of records in the dataset.
        n_records: usize,
    },

    /// A configuration value is out of bounds.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation, including the offending value.
        message: String,
    },

    /// A row handed to the dataset does not match the width of the first row.
    #[error("ragged input: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The training matrix contains a NaN entry.
    #[error("NaN in input data at row {row}, column {column}; impute incomplete records first")]
    NaNInInput { row: usize, column: usize },

    /// The training matrix contains an infinite entry.
    #[error("infinite value in input data at row {row}, column {column}")]
    NonFiniteInInput { row: usize, column: usize },

    /// A vector's length does not match the training column count.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Training column count.
        expected: usize,
        /// Provided vector length.
        found: usize,
    },

    /// A cluster lost all members and the configured policy refuses to continue.
    #[error("cluster {cluster} has no members after assignment pass {iteration}")]
    DegenerateCluster { cluster: usize, iteration: usize },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
