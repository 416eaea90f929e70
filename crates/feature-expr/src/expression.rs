//! Compiled Expressions

use crate::error::ExprError;
use crate::spec::FeatureSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of specifications bound to a base feature count.
///
/// Specification `i` produces column `base_features + i`, so the order of
/// `specs` is the derived-column creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    text: String,
    base_features: usize,
    specs: Vec<FeatureSpec>,
}

impl Expression {
    pub(crate) fn from_parts(
        text: String,
        base_features: usize,
        specs: Vec<FeatureSpec>,
    ) -> Result<Self, ExprError> {
        let expression = Self {
            text,
            base_features,
            specs,
        };
        expression.validate()?;
        Ok(expression)
    }

    /// Build an expression from specifications assembled in code
    pub fn from_specs(base_features: usize, specs: Vec<FeatureSpec>) -> Result<Self, ExprError> {
        for spec in &specs {
            spec.validate()?;
        }
        let text = specs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self::from_parts(text, base_features, specs)
    }

    /// Check every specification and its references.
    ///
    /// Specification `i` may only read columns `< base_features + i`.
    pub fn validate(&self) -> Result<(), ExprError> {
        if self.specs.is_empty() {
            return Err(ExprError::InvalidSpecification(
                "expression has no specifications".to_string(),
            ));
        }
        for (i, spec) in self.specs.iter().enumerate() {
            spec.validate()?;
            let available = self.base_features + i;
            if let Some(&index) = spec.source_indices().iter().find(|&&c| c >= available) {
                return Err(ExprError::OutOfRangeFeatureReference {
                    spec: i,
                    index,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Source text (rendered from the specifications when built in code)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of original input columns
    pub fn base_features(&self) -> usize {
        self.base_features
    }

    /// Specifications in creation order
    pub fn specs(&self) -> &[FeatureSpec] {
        &self.specs
    }

    /// Number of derived columns
    pub fn derived_features(&self) -> usize {
        self.specs.len()
    }

    /// Base plus derived column count
    pub fn total_columns(&self) -> usize {
        self.base_features + self.specs.len()
    }

    /// Whether specification `i` is the terminal one
    pub fn is_terminal(&self, i: usize) -> bool {
        i + 1 == self.specs.len()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
