//! Expression Error Types

use thiserror::Error;

/// Errors raised while compiling or assembling a feature expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// A comma-separated term could not be turned into a specification
    #[error("Malformed expression term {term} ({text:?}): {reason}")]
    MalformedExpression {
        term: usize,
        text: String,
        reason: String,
    },

    /// A specification reads a column that does not exist yet
    #[error("Specification {spec} references column {index}, but only {available} columns exist at that point")]
    OutOfRangeFeatureReference {
        spec: usize,
        index: usize,
        available: usize,
    },

    /// A programmatically built specification breaks the operator/source invariant
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),
}

impl ExprError {
    pub(crate) fn malformed(term: usize, text: &str, reason: impl Into<String>) -> Self {
        ExprError::MalformedExpression {
            term,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
