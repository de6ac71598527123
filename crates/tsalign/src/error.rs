//! Error types for the tsalign library.

use thiserror::Error;

use crate::align::SequenceRole;

/// Main error type for tsalign operations.
#[derive(Debug, Error)]
pub enum TsalignError {
    /// Columns of a dataset do not share the same row count.
    #[error("shape mismatch in column '{column}': expected {expected} rows, found {actual}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Payload could not be parsed into a rectangular dataset.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// An alignment input sequence has length zero.
    #[error("{role} sequence is empty")]
    EmptySequence { role: SequenceRole },

    /// An alignment input sequence is constant, so min-max normalization is undefined.
    #[error("{role} sequence is constant (all {len} values equal {value}); cannot normalize")]
    DegenerateRange {
        role: SequenceRole,
        value: f64,
        len: usize,
    },

    /// An alignment input sequence contains NaN or infinity.
    #[error("{role} sequence contains a non-finite value at index {index}")]
    NonFiniteValue { role: SequenceRole, index: usize },

    /// A dataset has no numeric column to align on.
    #[error("{role} dataset has no numeric column")]
    NoNumericColumn { role: SequenceRole },

    /// A dataset has no temporal column to aggregate over.
    #[error("dataset has no temporal column")]
    NoTemporalColumn,

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tsalign operations.
pub type Result<T> = std::result::Result<T, TsalignError>;
