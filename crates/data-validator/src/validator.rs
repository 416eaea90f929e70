//! Matrix and Sample Validator

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Validation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject NaN/infinite cells instead of only reporting them
    #[serde(default)]
    pub reject_non_finite: bool,
}

impl ValidationConfig {
    /// Config that rejects non-finite cells
    pub fn strict() -> Self {
        Self {
            reject_non_finite: true,
        }
    }
}

/// Summary of a validated matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    /// Number of rows
    pub rows: usize,
    /// Number of columns shared by every row
    pub columns: usize,
    /// `(row, column)` of every NaN/infinite cell
    pub non_finite_cells: Vec<(usize, usize)>,
}

impl MatrixReport {
    /// Whether every cell is finite
    pub fn is_finite(&self) -> bool {
        self.non_finite_cells.is_empty()
    }
}

/// Validator for training matrices and inference samples
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check that `rows` forms a non-empty rectangular matrix.
    ///
    /// Non-finite cells are listed in the report and only rejected when
    /// [`ValidationConfig::reject_non_finite`] is set.
    pub fn validate_matrix<R: AsRef<[f64]>>(
        &self,
        rows: &[R],
    ) -> Result<MatrixReport, ValidationError> {
        let first = rows.first().ok_or(ValidationError::EmptyMatrix)?;
        let columns = first.as_ref().len();
        if columns == 0 {
            return Err(ValidationError::NoColumns);
        }

        let mut non_finite_cells = Vec::new();
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != columns {
                return Err(ValidationError::RaggedRow {
                    row,
                    expected: columns,
                    actual: values.len(),
                });
            }
            for (column, value) in values.iter().enumerate() {
                if !value.is_finite() {
                    if self.config.reject_non_finite {
                        return Err(ValidationError::NonFinite { row, column });
                    }
                    non_finite_cells.push((row, column));
                }
            }
        }

        if !non_finite_cells.is_empty() {
            warn!(
                "Matrix contains {} non-finite cells, first at {:?}",
                non_finite_cells.len(),
                non_finite_cells[0]
            );
        }
        debug!("Validated {}x{} matrix", rows.len(), columns);

        Ok(MatrixReport {
            rows: rows.len(),
            columns,
            non_finite_cells,
        })
    }

    /// Check a single sample against the fitted feature count
    pub fn validate_sample(&self, sample: &[f64], expected: usize) -> Result<(), ValidationError> {
        if sample.len() != expected {
            return Err(ValidationError::WidthMismatch {
                expected,
                actual: sample.len(),
            });
        }
        if self.config.reject_non_finite {
            if let Some(column) = sample.iter().position(|v| !v.is_finite()) {
                return Err(ValidationError::NonFinite { row: 0, column });
            }
        }
        Ok(())
    }
}
