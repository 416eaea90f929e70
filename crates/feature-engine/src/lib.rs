//! Feature Synthesis Engine
//!
//! Fits an expression-driven feature pipeline on a training matrix and
//! replays it on single samples. Fitting records `(min, max)` for every base
//! and derived column; replay uses only those bounds and the compiled
//! specifications, so training and inference see the same values.

mod bounds;
mod error;
mod normalizer;
mod pipeline;
mod trainer;
mod transformer;

pub use bounds::{BoundsTable, ColumnBounds, ColumnKind};
pub use error::EngineError;
pub use normalizer::{bounds_of, normalize};
pub use pipeline::{to_matrix, to_matrix_with, FittedPipeline};
pub use trainer::{fit, FitOutcome};
pub use transformer::{predict, predict_rows, transform, transform_rows, TransformOptions};

pub use feature_expr::{compile, Expression, FeatureSpec, Operator};
