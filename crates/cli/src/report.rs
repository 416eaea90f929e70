//! Demo Report

use classifier::{Scorecard, ThresholdClassifier};
use feature_engine::{ColumnKind, FittedPipeline};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Fitted bounds of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsRow {
    /// 1-based feature name (`F1`, `F2`, ...)
    pub feature: String,
    pub kind: ColumnKind,
    pub min: f64,
    pub max: f64,
}

/// One sample replayed through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePreview {
    /// 0-based row in the dataset
    pub row: usize,
    /// Raw terminal value
    pub score: f64,
    pub predicted: u8,
    pub actual: f64,
    /// Every column normalized for display
    pub features: Vec<f64>,
}

/// Everything the demo prints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub expression: String,
    pub samples: usize,
    pub base_features: usize,
    pub bounds: Vec<BoundsRow>,
    pub classifier: ThresholdClassifier,
    pub scorecard: Scorecard,
    pub previews: Vec<SamplePreview>,
    pub model_path: Option<PathBuf>,
}

impl Report {
    /// Bounds rows for every column of a fitted pipeline
    pub fn bounds_rows(pipeline: &FittedPipeline) -> Vec<BoundsRow> {
        pipeline
            .bounds()
            .iter()
            .enumerate()
            .map(|(i, column)| BoundsRow {
                feature: format!("F{}", i + 1),
                kind: column.kind,
                min: column.min,
                max: column.max,
            })
            .collect()
    }

    /// Human-readable rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Expression: {}", self.expression);
        let _ = writeln!(
            out,
            "Fitted on {} samples x {} features",
            self.samples, self.base_features
        );

        let _ = writeln!(out, "\nBounds:");
        for row in &self.bounds {
            let _ = writeln!(
                out,
                "  {:<4} {:<8} [{:.6}, {:.6}]",
                row.feature,
                format!("{:?}", row.kind),
                row.min,
                row.max
            );
        }

        let _ = writeln!(out, "\nSamples:");
        for preview in &self.previews {
            let features: Vec<String> =
                preview.features.iter().map(|v| format!("{:.4}", v)).collect();
            let _ = writeln!(
                out,
                "  #{:<5} score={:.6} predicted={} actual={} [{}]",
                preview.row,
                preview.score,
                preview.predicted,
                preview.actual,
                features.join(", ")
            );
        }

        let _ = writeln!(
            out,
            "\nThreshold {}: {}/{} correct, accuracy {:.4}, MAE {:.4}",
            self.classifier.threshold,
            self.scorecard.correct,
            self.scorecard.samples,
            self.scorecard.accuracy,
            self.scorecard.mae
        );
        if let Some(path) = &self.model_path {
            let _ = writeln!(out, "Pipeline saved to {}", path.display());
        }
        out
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
