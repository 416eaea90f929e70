//! Per-Column Bounds Table

use crate::normalizer::{bounds_of, normalize};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Origin of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Original input column
    Base,
    /// Column created by a specification
    Derived,
}

/// `(min, max)` recorded for one column at fit time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnBounds {
    /// Column origin
    pub kind: ColumnKind,
    /// Minimum observed value
    pub min: f64,
    /// Maximum observed value
    pub max: f64,
}

impl ColumnBounds {
    /// Create bounds from known values
    pub fn new(kind: ColumnKind, min: f64, max: f64) -> Self {
        Self { kind, min, max }
    }

    /// Observe a column's values
    pub fn observe<I>(kind: ColumnKind, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = bounds_of(values);
        Self { kind, min, max }
    }

    /// Min-max normalize a value with these bounds
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }

    /// Whether normalizing with these bounds yields a non-finite result
    /// (range is zero, negative or not finite)
    pub fn is_degenerate(&self) -> bool {
        let range = self.max - self.min;
        !(range > 0.0 && range.is_finite())
    }
}

/// Ordered bounds for every base and derived column.
///
/// Position `p` holds base column `p` for `p < base`, and the output of
/// specification `p - base` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundsTable {
    columns: Vec<ColumnBounds>,
}

impl BoundsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` columns
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Build a table from externally chosen `(min, max)` pairs
    pub fn from_pairs(base: &[(f64, f64)], derived: &[(f64, f64)]) -> Self {
        let columns = base
            .iter()
            .map(|&(min, max)| ColumnBounds::new(ColumnKind::Base, min, max))
            .chain(
                derived
                    .iter()
                    .map(|&(min, max)| ColumnBounds::new(ColumnKind::Derived, min, max)),
            )
            .collect();
        Self { columns }
    }

    /// Append the next column's bounds
    pub fn push(&mut self, bounds: ColumnBounds) {
        self.columns.push(bounds);
    }

    /// Number of columns covered
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate in column order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnBounds> {
        self.columns.iter()
    }

    /// Number of leading base columns
    pub fn base_columns(&self) -> usize {
        self.columns
            .iter()
            .take_while(|c| c.kind == ColumnKind::Base)
            .count()
    }

    /// Positions whose bounds make normalization non-finite
    pub fn degenerate_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_degenerate())
            .map(|(position, _)| position)
            .collect()
    }

    /// Normalize `value` with the bounds at `position`
    #[inline]
    pub fn normalize(&self, position: usize, value: f64) -> f64 {
        self.columns[position].normalize(value)
    }
}

impl Index<usize> for BoundsTable {
    type Output = ColumnBounds;

    fn index(&self, position: usize) -> &Self::Output {
        &self.columns[position]
    }
}
