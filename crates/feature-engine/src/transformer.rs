//! Single-Sample Transformer
//!
//! Replays a fitted expression on one raw sample, appending one value per
//! specification. Unlike fit, the sample is not normalized wholesale up
//! front: non-terminal specifications normalize each input with that
//! column's stored bounds as they read it, and the terminal specification
//! combines the current values as they stand.

use crate::bounds::BoundsTable;
use crate::error::EngineError;
use data_validator::Validator;
use feature_expr::Expression;
use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Normalization applied on top of the raw replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Normalize the appended terminal value with its stored bounds
    #[serde(default)]
    pub normalize_terminal_feature: bool,
    /// After all derived values are computed, normalize the base entries in place
    #[serde(default)]
    pub normalize_base_features_afterward: bool,
}

impl TransformOptions {
    /// Raw replay, as used by [`predict`]
    pub fn raw() -> Self {
        Self::default()
    }

    /// Every entry normalized, for display
    pub fn display() -> Self {
        Self {
            normalize_terminal_feature: true,
            normalize_base_features_afterward: true,
        }
    }
}

/// Check that `bounds` covers `expression` so replay indexing stays in range
pub(crate) fn check_compatible(
    expression: &Expression,
    bounds: &BoundsTable,
) -> Result<(), EngineError> {
    expression.validate()?;
    let expected = expression.total_columns();
    if bounds.len() != expected {
        return Err(EngineError::BoundsMismatch {
            expected,
            actual: bounds.len(),
        });
    }
    Ok(())
}

/// Replay `expression` on one raw sample.
///
/// Returns `base + derived` entries. The terminal entry is raw unless
/// [`TransformOptions::normalize_terminal_feature`] is set.
///
/// # Errors
/// - [`EngineError::Validation`] if `sample` is not `base` wide
/// - [`EngineError::BoundsMismatch`] if `bounds` was not fitted for `expression`
pub fn transform(
    expression: &Expression,
    bounds: &BoundsTable,
    sample: &[f64],
    options: TransformOptions,
) -> Result<Vec<f64>, EngineError> {
    check_compatible(expression, bounds)?;
    Validator::default().validate_sample(sample, expression.base_features())?;
    Ok(replay(expression, bounds, sample, options))
}

/// Raw value of the terminal specification for one sample
pub fn predict(
    expression: &Expression,
    bounds: &BoundsTable,
    sample: &[f64],
) -> Result<f64, EngineError> {
    let x = transform(expression, bounds, sample, TransformOptions::raw())?;
    Ok(x[x.len() - 1])
}

/// Replay every row of a matrix; row `r` of the result is `transform(rows[r])`
pub fn transform_rows(
    expression: &Expression,
    bounds: &BoundsTable,
    rows: ArrayView2<'_, f64>,
    options: TransformOptions,
) -> Result<Array2<f64>, EngineError> {
    check_compatible(expression, bounds)?;
    let validator = Validator::default();
    let base = expression.base_features();

    let mut out = Array2::<f64>::zeros((rows.nrows(), expression.total_columns()));
    for (row, mut target) in rows.rows().into_iter().zip(out.rows_mut()) {
        let sample = row.to_vec();
        validator.validate_sample(&sample, base)?;
        let x = replay(expression, bounds, &sample, options);
        target.assign(&Array1::from(x));
    }
    Ok(out)
}

/// Predict every row of a matrix
pub fn predict_rows(
    expression: &Expression,
    bounds: &BoundsTable,
    rows: ArrayView2<'_, f64>,
) -> Result<Array1<f64>, EngineError> {
    let augmented = transform_rows(expression, bounds, rows, TransformOptions::raw())?;
    let last = expression.total_columns() - 1;
    Ok(augmented.column(last).to_owned())
}

/// Replay without checks; callers have validated widths and table length
fn replay(
    expression: &Expression,
    bounds: &BoundsTable,
    sample: &[f64],
    options: TransformOptions,
) -> Vec<f64> {
    let base = expression.base_features();
    let mut x = Vec::with_capacity(expression.total_columns());
    x.extend_from_slice(sample);

    for (i, spec) in expression.specs().iter().enumerate() {
        let position = base + i;
        let value = if expression.is_terminal(i) {
            let raw = spec.combine(|c| x[c]);
            if options.normalize_terminal_feature {
                bounds.normalize(position, raw)
            } else {
                raw
            }
        } else {
            // derived inputs were normalized when appended and are normalized again here
            let combined = spec.combine(|c| bounds.normalize(c, x[c]));
            bounds.normalize(position, combined)
        };
        x.push(value);
    }

    if options.normalize_base_features_afterward {
        for (c, value) in x.iter_mut().take(base).enumerate() {
            *value = bounds.normalize(c, *value);
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::fit;
    use data_validator::ValidationError;
    use feature_expr::compile;
    use ndarray::array;

    const REFERENCE: &str = "F1+F2+F3,F1*F2*F3,F5+F5+F5+F6";

    fn fitted(text: &str, base: usize, data: Array2<f64>) -> (Expression, BoundsTable) {
        let expr = compile(text, base).unwrap();
        let outcome = fit(&expr, data.view()).unwrap();
        (expr, outcome.bounds)
    }

    #[test]
    fn test_reference_predict() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]],
        );
        assert_eq!(predict(&expr, &bounds, &[1.0, 1.0, 1.0, 1.0]).unwrap(), 4.0);
        assert_eq!(predict(&expr, &bounds, &[0.0, 0.0, 0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_raw_transform_keeps_base_entries() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [2.0, 2.0, 2.0, 2.0]],
        );
        let x = transform(&expr, &bounds, &[2.0, 2.0, 2.0, 2.0], TransformOptions::raw()).unwrap();
        assert_eq!(x, vec![2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_display_transform() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [2.0, 2.0, 2.0, 2.0]],
        );
        let x = transform(&expr, &bounds, &[2.0, 2.0, 2.0, 2.0], TransformOptions::display())
            .unwrap();
        assert_eq!(x, vec![1.0; 7]);
    }

    #[test]
    fn test_options_are_independent() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [2.0, 2.0, 2.0, 2.0]],
        );
        let sample = [2.0, 2.0, 2.0, 2.0];

        let terminal_only = TransformOptions {
            normalize_terminal_feature: true,
            normalize_base_features_afterward: false,
        };
        let x = transform(&expr, &bounds, &sample, terminal_only).unwrap();
        assert_eq!(x, vec![2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0]);

        let base_only = TransformOptions {
            normalize_terminal_feature: false,
            normalize_base_features_afterward: true,
        };
        let x = transform(&expr, &bounds, &sample, base_only).unwrap();
        assert_eq!(x, vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_terminal_reads_raw_base_values() {
        // fit sees normalized bases, replay of the terminal term does not
        let (expr, bounds) = fitted("F1+F2", 2, array![[0.0, 0.0], [2.0, 4.0]]);
        assert_eq!(bounds[2].max, 2.0);
        assert_eq!(predict(&expr, &bounds, &[2.0, 4.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_nonterminal_normalizes_derived_inputs_again() {
        // F2 is stored normalized, then normalized with its own bounds when F3 reads it
        let (expr, bounds) = fitted("F1+F1,F2*F2,F3", 1, array![[0.0], [2.0]]);
        let x = transform(&expr, &bounds, &[2.0], TransformOptions::raw()).unwrap();
        assert_eq!(x, vec![2.0, 1.0, 0.25, 0.25]);
    }

    #[test]
    fn test_base_normalized_after_derived() {
        // the terminal term still reads the raw base value
        let (expr, bounds) = fitted("F1*F1", 1, array![[0.0], [2.0]]);
        let x = transform(&expr, &bounds, &[3.0], TransformOptions::display()).unwrap();
        // raw terminal 9, normalized with (0, 1) -> 9; base normalized 3 / 2
        assert_eq!(x, vec![1.5, 9.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]],
        );
        assert!(matches!(
            predict(&expr, &bounds, &[1.0, 1.0, 1.0]),
            Err(EngineError::Validation(ValidationError::WidthMismatch {
                expected: 4,
                actual: 3
            }))
        ));
    }

    #[test]
    fn test_rows_width_mismatch() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]],
        );
        let rows = array![[1.0, 1.0, 1.0, 1.0, 1.0]];
        assert!(matches!(
            predict_rows(&expr, &bounds, rows.view()),
            Err(EngineError::Validation(ValidationError::WidthMismatch {
                expected: 4,
                actual: 5
            }))
        ));
    }

    #[test]
    fn test_non_finite_sample_propagates() {
        let (expr, bounds) = fitted(
            REFERENCE,
            4,
            array![[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]],
        );
        assert!(predict(&expr, &bounds, &[f64::NAN, 1.0, 1.0, 1.0])
            .unwrap()
            .is_nan());
    }

    #[test]
    fn test_bounds_mismatch() {
        let expr = compile("F1+F2", 2).unwrap();
        let bounds = BoundsTable::from_pairs(&[(0.0, 1.0), (0.0, 1.0)], &[]);
        assert!(matches!(
            predict(&expr, &bounds, &[0.5, 0.5]),
            Err(EngineError::BoundsMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_rows_match_single_sample() {
        let data = array![[0.0, 1.0, 2.0, 3.0], [3.0, 2.0, 1.0, 0.0], [1.0, 1.0, 2.0, 2.0]];
        let (expr, bounds) = fitted(REFERENCE, 4, data.clone());
        let all = predict_rows(&expr, &bounds, data.view()).unwrap();
        for (r, row) in data.rows().into_iter().enumerate() {
            let single = predict(&expr, &bounds, &row.to_vec()).unwrap();
            assert_eq!(all[r].to_bits(), single.to_bits());
        }
    }
}
