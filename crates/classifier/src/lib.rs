//! Threshold Classifier
//!
//! Turns the scalar produced by a fitted feature pipeline into a binary
//! label and scores the labels against ground truth.

mod scoring;
mod threshold;

pub use scoring::Scorecard;
pub use threshold::ThresholdClassifier;

use thiserror::Error;

/// Errors during scoring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Prediction count {predicted} does not match label count {actual}")]
    LengthMismatch { predicted: usize, actual: usize },
    #[error("Nothing to score")]
    Empty,
}
