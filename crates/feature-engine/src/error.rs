//! Engine Error Types

use data_validator::ValidationError;
use feature_expr::ExprError;
use thiserror::Error;

/// Errors raised while fitting, replaying or persisting a pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// Expression failed to compile or validate
    #[error(transparent)]
    Expression(#[from] ExprError),

    /// Input rows failed shape validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Training matrix has no rows
    #[error("Training matrix has no rows")]
    EmptyMatrix,

    /// Input width does not match the base feature count
    #[error("Expected {expected} base features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A specification reads a column that does not exist yet
    #[error("Specification {spec} references column {index}, but only {available} columns exist at that point")]
    OutOfRangeFeatureReference {
        spec: usize,
        index: usize,
        available: usize,
    },

    /// A column's range is zero or non-finite, so normalization yields NaN/inf
    #[error("Column {column} has degenerate bounds [{min}, {max}]")]
    DegenerateBounds { column: usize, min: f64, max: f64 },

    /// Bounds table does not cover every base and derived column
    #[error("Bounds table has {actual} columns, expression needs {expected}")]
    BoundsMismatch { expected: usize, actual: usize },

    /// Persisted pipeline is internally inconsistent
    #[error("Corrupt pipeline: {0}")]
    CorruptPipeline(String),

    /// postcard encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] postcard::Error),

    /// File access failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
