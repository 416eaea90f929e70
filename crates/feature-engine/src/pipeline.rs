//! Fitted Pipeline
//!
//! Pairs a compiled expression with its bounds table. The table is the only
//! state produced by fitting; both halves are immutable afterwards, so a
//! `FittedPipeline` can be shared across threads for concurrent replay.

use crate::bounds::{BoundsTable, ColumnKind};
use crate::error::EngineError;
use crate::trainer::{self, FitOutcome};
use crate::transformer::{self, check_compatible, TransformOptions};
use data_validator::Validator;
use feature_expr::Expression;
use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Compiled expression plus the bounds fitted for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    expression: Expression,
    bounds: BoundsTable,
}

impl FittedPipeline {
    /// Fit on a training matrix (`rows x base_features`)
    pub fn fit(expression: Expression, data: ArrayView2<'_, f64>) -> Result<Self, EngineError> {
        let outcome = trainer::fit(&expression, data)?;
        Ok(Self {
            expression,
            bounds: outcome.bounds,
        })
    }

    /// Fit and also return the augmented training matrix for inspection
    pub fn fit_with_outcome(
        expression: Expression,
        data: ArrayView2<'_, f64>,
    ) -> Result<(Self, Array2<f64>), EngineError> {
        let FitOutcome { bounds, augmented } = trainer::fit(&expression, data)?;
        Ok((Self { expression, bounds }, augmented))
    }

    /// Fit on row-major samples, checking that they form a rectangular matrix
    pub fn fit_rows<R: AsRef<[f64]>>(
        expression: Expression,
        rows: &[R],
    ) -> Result<Self, EngineError> {
        let data = to_matrix(rows)?;
        Self::fit(expression, data.view())
    }

    /// Build a pipeline from bounds chosen outside of fitting
    pub fn from_bounds(expression: Expression, bounds: BoundsTable) -> Result<Self, EngineError> {
        let pipeline = Self { expression, bounds };
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Check that the table covers every column with the right kinds
    pub fn validate(&self) -> Result<(), EngineError> {
        check_compatible(&self.expression, &self.bounds)?;
        let base = self.expression.base_features();
        let leading = self.bounds.base_columns();
        if leading != base {
            return Err(EngineError::CorruptPipeline(format!(
                "{} leading base columns, expected {}",
                leading, base
            )));
        }
        if let Some(offset) = self
            .bounds
            .iter()
            .skip(base)
            .position(|column| column.kind != ColumnKind::Derived)
        {
            return Err(EngineError::CorruptPipeline(format!(
                "column {} is {:?}, expected {:?}",
                base + offset,
                ColumnKind::Base,
                ColumnKind::Derived
            )));
        }
        Ok(())
    }

    /// Fail on the first column whose bounds make normalization non-finite
    pub fn ensure_non_degenerate(&self) -> Result<(), EngineError> {
        match self.bounds.degenerate_columns().first() {
            Some(&column) => Err(EngineError::DegenerateBounds {
                column,
                min: self.bounds[column].min,
                max: self.bounds[column].max,
            }),
            None => Ok(()),
        }
    }

    /// Get the compiled expression
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Get the fitted bounds
    pub fn bounds(&self) -> &BoundsTable {
        &self.bounds
    }

    /// Number of raw input features
    pub fn base_features(&self) -> usize {
        self.expression.base_features()
    }

    /// Replay on one raw sample
    pub fn transform(
        &self,
        sample: &[f64],
        options: TransformOptions,
    ) -> Result<Vec<f64>, EngineError> {
        transformer::transform(&self.expression, &self.bounds, sample, options)
    }

    /// Raw terminal value for one sample
    pub fn predict(&self, sample: &[f64]) -> Result<f64, EngineError> {
        transformer::predict(&self.expression, &self.bounds, sample)
    }

    /// Replay on every row of a matrix
    pub fn transform_rows(
        &self,
        rows: ArrayView2<'_, f64>,
        options: TransformOptions,
    ) -> Result<Array2<f64>, EngineError> {
        transformer::transform_rows(&self.expression, &self.bounds, rows, options)
    }

    /// Predict every row of a matrix
    pub fn predict_rows(&self, rows: ArrayView2<'_, f64>) -> Result<Array1<f64>, EngineError> {
        transformer::predict_rows(&self.expression, &self.bounds, rows)
    }

    /// Serialize with postcard
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize with postcard and validate
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let pipeline: Self = postcard::from_bytes(bytes)?;
        pipeline
            .validate()
            .map_err(|e| EngineError::CorruptPipeline(e.to_string()))?;
        Ok(pipeline)
    }

    /// Write the pipeline to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(
            "Saved pipeline {:?} ({} bytes) to {}",
            self.expression.text(),
            bytes.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Read a pipeline written by [`FittedPipeline::save_to_file`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let bytes = std::fs::read(path.as_ref())?;
        let pipeline = Self::from_bytes(&bytes)?;
        debug!(
            "Loaded pipeline {:?} from {}",
            pipeline.expression.text(),
            path.as_ref().display()
        );
        Ok(pipeline)
    }
}

/// Copy row-major samples into a matrix after shape validation
pub fn to_matrix<R: AsRef<[f64]>>(rows: &[R]) -> Result<Array2<f64>, EngineError> {
    to_matrix_with(rows, &Validator::default())
}

/// Copy row-major samples into a matrix, validated once with `validator`
pub fn to_matrix_with<R: AsRef<[f64]>>(
    rows: &[R],
    validator: &Validator,
) -> Result<Array2<f64>, EngineError> {
    let report = validator.validate_matrix(rows)?;
    Ok(Array2::from_shape_fn((report.rows, report.columns), |(r, c)| {
        rows[r].as_ref()[c]
    }))
}
