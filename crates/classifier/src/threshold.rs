//! Fixed-Threshold Decision Rule

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default decision threshold for the banknote expression
pub const DEFAULT_THRESHOLD: f64 = 1.37;

/// `score > threshold ? above : at_or_below`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdClassifier {
    /// Decision threshold
    pub threshold: f64,
    /// Label for scores strictly above the threshold
    pub above: u8,
    /// Label for every other score, including NaN
    pub at_or_below: u8,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            above: 0,
            at_or_below: 1,
        }
    }
}

impl ThresholdClassifier {
    /// Create a classifier with the default label mapping (above -> 0, else 1)
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Classify one score
    pub fn classify(&self, score: f64) -> u8 {
        if score > self.threshold {
            self.above
        } else {
            self.at_or_below
        }
    }

    /// Classify a batch of scores
    pub fn classify_all(&self, scores: &[f64]) -> Vec<u8> {
        let labels: Vec<u8> = scores.iter().map(|&s| self.classify(s)).collect();
        debug!(
            "Classified {} scores at threshold {}: {} above",
            scores.len(),
            self.threshold,
            labels.iter().filter(|&&l| l == self.above).count()
        );
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        let classifier = ThresholdClassifier::default();
        assert_eq!(classifier.classify(2.0), 0);
        assert_eq!(classifier.classify(1.0), 1);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let classifier = ThresholdClassifier::new(1.37);
        assert_eq!(classifier.classify(1.37), 1);
    }

    #[test]
    fn test_nan_is_at_or_below() {
        let classifier = ThresholdClassifier::default();
        assert_eq!(classifier.classify(f64::NAN), 1);
    }

    #[test]
    fn test_custom_labels() {
        let classifier = ThresholdClassifier {
            threshold: 0.0,
            above: 1,
            at_or_below: 0,
        };
        assert_eq!(classifier.classify_all(&[-1.0, 0.5]), vec![0, 1]);
    }
}
