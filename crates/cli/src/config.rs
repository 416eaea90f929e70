//! Demo configuration

use classifier::ThresholdClassifier;
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when no path is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "feature-synth.toml";

/// Environment variable prefix (`FEATURE_SYNTH_EXPRESSION`, ...)
pub const ENV_PREFIX: &str = "FEATURE_SYNTH";

/// Expression fitted on the banknote dataset
pub const BANKNOTE_EXPRESSION: &str = "F1+F2+F3,F1*F2*F3,F5+F5+F5+F6";

/// Where the label sits in each CSV row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColumn {
    First,
    Last,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

/// Demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// CSV dataset with one label column and numeric features
    pub data_path: PathBuf,

    /// Whether the first line is a header
    pub has_header: bool,

    /// Label position in each row
    pub label_column: LabelColumn,

    /// Feature expression
    pub expression: String,

    /// Decision rule applied to the pipeline output
    pub classifier: ThresholdClassifier,

    /// Leading rows shown in the report (the last row is always shown)
    pub preview_rows: usize,

    /// Report format
    pub report_format: ReportFormat,

    /// Write the fitted pipeline here when set
    pub model_path: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,

    /// Input validation
    pub validation: ValidationConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/banknote.csv"),
            has_header: true,
            label_column: LabelColumn::Last,
            expression: BANKNOTE_EXPRESSION.to_string(),
            classifier: ThresholdClassifier::default(),
            preview_rows: 2,
            report_format: ReportFormat::Text,
            model_path: None,
            log_level: "info".to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load from a TOML file and `FEATURE_SYNTH_*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let (file, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(file).required(required))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }
}
