//! Feature Synthesis Demo
//!
//! Loads a labelled CSV dataset, fits a feature expression on it, turns the
//! terminal value into a label with a fixed threshold and reports the fitted
//! bounds, a few replayed samples and the resulting accuracy.

pub mod config;
pub mod dataset;
pub mod report;

pub use config::{DemoConfig, LabelColumn, ReportFormat};
pub use dataset::{Dataset, DatasetError};
pub use report::{BoundsRow, Report, SamplePreview};

use anyhow::Context;
use classifier::Scorecard;
use data_validator::Validator;
use feature_engine::{compile, to_matrix_with, FittedPipeline, TransformOptions};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter {:?}", level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

/// Load the configured dataset and evaluate it
pub fn run(config: &DemoConfig) -> anyhow::Result<Report> {
    let dataset = Dataset::load(&config.data_path, config.label_column, config.has_header)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let (_, report) = evaluate(&dataset, config)?;
    Ok(report)
}

/// Fit the configured expression on `dataset`, classify every sample and
/// build the report
pub fn evaluate(
    dataset: &Dataset,
    config: &DemoConfig,
) -> anyhow::Result<(FittedPipeline, Report)> {
    let validator = Validator::new(config.validation.clone());
    let data = to_matrix_with(&dataset.rows, &validator)?;

    let expression = compile(&config.expression, dataset.features())
        .with_context(|| format!("compiling {:?}", config.expression))?;
    let pipeline = FittedPipeline::fit(expression, data.view())?;

    let degenerate = pipeline.bounds().degenerate_columns();
    if !degenerate.is_empty() {
        warn!("Degenerate bounds at columns {:?}", degenerate);
    }

    let scores = pipeline.predict_rows(data.view())?.to_vec();
    let predicted = config.classifier.classify_all(&scores);
    let scorecard = Scorecard::evaluate(&predicted, &dataset.labels)?;
    info!(
        "Accuracy {:.4} ({}/{}) at threshold {}",
        scorecard.accuracy, scorecard.correct, scorecard.samples, config.classifier.threshold
    );

    let mut previews = Vec::new();
    for row in preview_indices(dataset.len(), config.preview_rows) {
        previews.push(SamplePreview {
            row,
            score: scores[row],
            predicted: predicted[row],
            actual: dataset.labels[row],
            features: pipeline.transform(&dataset.rows[row], TransformOptions::display())?,
        });
    }

    if let Some(path) = &config.model_path {
        pipeline
            .save_to_file(path)
            .with_context(|| format!("saving pipeline to {}", path.display()))?;
    }

    let report = Report {
        expression: pipeline.expression().text().to_string(),
        samples: dataset.len(),
        base_features: pipeline.base_features(),
        bounds: Report::bounds_rows(&pipeline),
        classifier: config.classifier,
        scorecard,
        previews,
        model_path: config.model_path.clone(),
    };
    Ok((pipeline, report))
}

/// First `leading` rows plus the last row
fn preview_indices(len: usize, leading: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..leading.min(len)).collect();
    if len > 0 && !indices.contains(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}
