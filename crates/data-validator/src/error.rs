//! Validation Error Types

use thiserror::Error;

/// Errors during data validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Matrix has no rows
    #[error("Matrix has no rows")]
    EmptyMatrix,

    /// Rows exist but carry no columns
    #[error("Matrix rows have no columns")]
    NoColumns,

    /// A row is wider or narrower than the first one
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Sample width does not match the fitted feature count
    #[error("Sample has {actual} features, expected {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    /// NaN or infinite cell (only raised when rejection is enabled)
    #[error("Non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },
}
