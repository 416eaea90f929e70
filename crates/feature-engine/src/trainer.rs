//! Pipeline Trainer
//!
//! Fits the bounds table in one batch pass. The training matrix is fully
//! base-normalized first, then every specification appends one column in
//! order. Non-terminal columns are appended normalized so later
//! specifications read them in `[0, 1]`; the terminal column is appended raw.

use crate::bounds::{BoundsTable, ColumnBounds, ColumnKind};
use crate::error::EngineError;
use feature_expr::Expression;
use ndarray::{s, Array1, Array2, ArrayView2};
use tracing::{debug, info, warn};

/// Result of a fit
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// Bounds for every base and derived column
    pub bounds: BoundsTable,
    /// Working matrix after the last specification (`rows x (base + derived)`):
    /// normalized base and intermediate columns, raw terminal column
    pub augmented: Array2<f64>,
}

/// Fit `expression` on a training matrix with one column per base feature.
///
/// # Errors
/// - [`EngineError::EmptyMatrix`] if `data` has no rows
/// - [`EngineError::DimensionMismatch`] if its width differs from the base feature count
/// - [`EngineError::OutOfRangeFeatureReference`] if a specification reads a
///   column not created before it
pub fn fit(expression: &Expression, data: ArrayView2<'_, f64>) -> Result<FitOutcome, EngineError> {
    let (rows, width) = data.dim();
    if rows == 0 {
        return Err(EngineError::EmptyMatrix);
    }
    let base = expression.base_features();
    if width != base {
        return Err(EngineError::DimensionMismatch {
            expected: base,
            actual: width,
        });
    }

    let total = expression.total_columns();
    let mut working = Array2::<f64>::zeros((rows, total));
    working.slice_mut(s![.., ..base]).assign(&data);
    let mut bounds = BoundsTable::with_capacity(total);

    // Base columns are normalized in place before any derived feature
    for j in 0..base {
        let mut column = working.column_mut(j);
        let column_bounds = ColumnBounds::observe(ColumnKind::Base, column.iter().copied());
        column.mapv_inplace(|v| column_bounds.normalize(v));
        bounds.push(column_bounds);
    }

    for (i, spec) in expression.specs().iter().enumerate() {
        spec.validate()?;
        let position = base + i;
        if let Some(&index) = spec.source_indices().iter().find(|&&c| c >= position) {
            return Err(EngineError::OutOfRangeFeatureReference {
                spec: i,
                index,
                available: position,
            });
        }

        let raw: Array1<f64> = working
            .rows()
            .into_iter()
            .map(|row| spec.combine(|c| row[c]))
            .collect();
        let column_bounds = ColumnBounds::observe(ColumnKind::Derived, raw.iter().copied());
        bounds.push(column_bounds);

        let mut column = working.column_mut(position);
        if expression.is_terminal(i) {
            column.assign(&raw);
        } else {
            column.assign(&raw.mapv(|v| column_bounds.normalize(v)));
        }

        debug!(
            "Feature F{} = {}: min {:.4}, max {:.4}",
            position + 1,
            spec,
            column_bounds.min,
            column_bounds.max
        );
    }

    for position in bounds.degenerate_columns() {
        let column_bounds = &bounds[position];
        warn!(
            "Column F{} has degenerate bounds [{}, {}], normalized values will be non-finite",
            position + 1,
            column_bounds.min,
            column_bounds.max
        );
    }

    info!(
        "Fitted {:?} on {} rows: {} base + {} derived columns",
        expression.text(),
        rows,
        base,
        expression.derived_features()
    );

    Ok(FitOutcome {
        bounds,
        augmented: working,
    })
}
