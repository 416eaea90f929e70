//! Feature Specifications

use crate::error::ExprError;
use crate::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One derived feature: an ordered list of source columns and the operators
/// folding them together left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// 0-based column positions, seed first
    source_indices: Vec<usize>,
    /// `operators[j]` joins the accumulator with `source_indices[j + 1]`
    operators: Vec<Operator>,
}

impl FeatureSpec {
    /// Create a specification, checking `operators.len() == source_indices.len() - 1`
    pub fn new(source_indices: Vec<usize>, operators: Vec<Operator>) -> Result<Self, ExprError> {
        let spec = Self {
            source_indices,
            operators,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the length invariant (deserialized specs bypass [`FeatureSpec::new`])
    pub fn validate(&self) -> Result<(), ExprError> {
        if self.source_indices.is_empty() {
            return Err(ExprError::InvalidSpecification(
                "specification has no source columns".to_string(),
            ));
        }
        if self.operators.len() + 1 != self.source_indices.len() {
            return Err(ExprError::InvalidSpecification(format!(
                "{} source columns need {} operators, got {}",
                self.source_indices.len(),
                self.source_indices.len() - 1,
                self.operators.len()
            )));
        }
        Ok(())
    }

    /// Get the source column positions
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Get the operator chain
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// `(operator, column)` pairs applied after the seed
    pub fn steps(&self) -> impl Iterator<Item = (Operator, usize)> + '_ {
        self.operators
            .iter()
            .copied()
            .zip(self.source_indices.iter().skip(1).copied())
    }

    /// Fold the operator chain over the values produced by `value_of`.
    ///
    /// `value_of` is called once per source index, in order, so the caller
    /// decides whether inputs are normalized first. A specification without
    /// sources combines to NaN.
    pub fn combine<F>(&self, mut value_of: F) -> f64
    where
        F: FnMut(usize) -> f64,
    {
        let Some(&first) = self.source_indices.first() else {
            return f64::NAN;
        };
        let seed = value_of(first);
        self.steps()
            .fold(seed, |acc, (op, column)| op.apply(acc, value_of(column)))
    }
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(seed) = self.source_indices.first() else {
            return Ok(());
        };
        write!(f, "F{}", seed + 1)?;
        for (op, column) in self.steps() {
            write!(f, "{}F{}", op, column + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_operator_count() {
        assert!(FeatureSpec::new(vec![0, 1], vec![Operator::Add]).is_ok());
        assert!(FeatureSpec::new(vec![0, 1], vec![]).is_err());
        assert!(FeatureSpec::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_single_source_needs_no_operator() {
        let spec = FeatureSpec::new(vec![3], vec![]).unwrap();
        assert_eq!(spec.combine(|c| c as f64 * 10.0), 30.0);
        assert_eq!(spec.to_string(), "F4");
    }

    #[test]
    fn test_combine_left_to_right() {
        // (c0 - c1) * c2 with c = [5, 3, 4]
        let spec =
            FeatureSpec::new(vec![0, 1, 2], vec![Operator::Subtract, Operator::Multiply]).unwrap();
        let values = [5.0, 3.0, 4.0];
        assert_eq!(spec.combine(|c| values[c]), 8.0);
    }

    #[test]
    fn test_display() {
        let spec = FeatureSpec::new(
            vec![4, 4, 4, 5],
            vec![Operator::Add, Operator::Add, Operator::Add],
        )
        .unwrap();
        assert_eq!(spec.to_string(), "F5+F5+F5+F6");
    }

    #[test]
    fn test_deserialized_spec_without_sources() {
        let spec: FeatureSpec =
            serde_json::from_str(r#"{"source_indices":[],"operators":[]}"#).unwrap();
        assert!(matches!(
            spec.validate(),
            Err(ExprError::InvalidSpecification(_))
        ));
        assert_eq!(spec.to_string(), "");
        assert_eq!(spec.steps().count(), 0);
        assert!(spec.combine(|c| c as f64).is_nan());
    }
}
