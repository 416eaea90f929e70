//! Accuracy and MAE Scoring

use crate::ScoringError;
use serde::{Deserialize, Serialize};

/// Agreement between predicted labels and ground truth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Number of scored samples
    pub samples: usize,
    /// Samples whose predicted label equals the ground truth
    pub correct: usize,
    /// `correct / samples`
    pub accuracy: f64,
    /// Mean absolute difference between predicted and true labels
    pub mae: f64,
}

impl Scorecard {
    /// Score predicted labels against ground-truth labels
    pub fn evaluate(predicted: &[u8], actual: &[f64]) -> Result<Self, ScoringError> {
        if predicted.len() != actual.len() {
            return Err(ScoringError::LengthMismatch {
                predicted: predicted.len(),
                actual: actual.len(),
            });
        }
        if predicted.is_empty() {
            return Err(ScoringError::Empty);
        }

        let mut correct = 0;
        let mut total_error = 0.0;
        for (&p, &a) in predicted.iter().zip(actual) {
            let p = f64::from(p);
            if p == a {
                correct += 1;
            }
            total_error += (p - a).abs();
        }

        let samples = predicted.len();
        Ok(Self {
            samples,
            correct,
            accuracy: correct as f64 / samples as f64,
            mae: total_error / samples as f64,
        })
    }
}
