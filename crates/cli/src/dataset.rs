//! Labelled CSV Dataset
//!
//! Comma-separated numeric rows with one label column at either end.
//! Blank lines are skipped; every other record must parse completely.

use crate::config::LabelColumn;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors while reading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: field {field} is not a number: {value:?}")]
    InvalidNumber {
        line: u64,
        field: usize,
        value: String,
    },

    #[error("Line {line}: expected a label and at least one feature, found {fields} field(s)")]
    TooFewFields { line: u64, fields: usize },

    #[error("Line {line}: expected {expected} fields, found {actual}")]
    InconsistentWidth {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("Dataset has no rows")]
    Empty,
}

/// Feature rows and their labels
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// One feature vector per sample
    pub rows: Vec<Vec<f64>>,
    /// Ground-truth label per sample
    pub labels: Vec<f64>,
}

impl Dataset {
    /// Read and parse a CSV file
    pub fn load(
        path: &Path,
        label_column: LabelColumn,
        has_header: bool,
    ) -> Result<Self, DatasetError> {
        let reader = Self::reader(has_header).from_path(path)?;
        let dataset = Self::from_reader(reader, label_column)?;
        info!(
            "Loaded {} samples with {} features from {}",
            dataset.len(),
            dataset.features(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV text
    pub fn parse_csv(
        text: &str,
        label_column: LabelColumn,
        has_header: bool,
    ) -> Result<Self, DatasetError> {
        let reader = Self::reader(has_header).from_reader(text.as_bytes());
        Self::from_reader(reader, label_column)
    }

    fn reader(has_header: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        // width is checked per record to report the offending line
        builder.has_headers(has_header).flexible(true).trim(Trim::All);
        builder
    }

    fn from_reader<R: Read>(
        mut reader: csv::Reader<R>,
        label_column: LabelColumn,
    ) -> Result<Self, DatasetError> {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut width = None;

        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let mut values = parse_record(&record, line)?;

            if values.len() < 2 {
                return Err(DatasetError::TooFewFields {
                    line,
                    fields: values.len(),
                });
            }
            match width {
                None => width = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(DatasetError::InconsistentWidth {
                        line,
                        expected,
                        actual: values.len(),
                    });
                }
                Some(_) => {}
            }

            let label = match label_column {
                LabelColumn::First => values.remove(0),
                // non-empty, checked above
                LabelColumn::Last => values.pop().unwrap_or(f64::NAN),
            };
            labels.push(label);
            rows.push(values);
        }

        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        debug!("Parsed {} CSV records", rows.len());
        Ok(Self { rows, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of features per sample
    pub fn features(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

fn parse_record(record: &StringRecord, line: u64) -> Result<Vec<f64>, DatasetError> {
    record
        .iter()
        .enumerate()
        .map(|(field, value)| {
            value.parse::<f64>().map_err(|_| DatasetError::InvalidNumber {
                line,
                field: field + 1,
                value: value.to_string(),
            })
        })
        .collect()
}
