//! Feature Expression Compiler
//!
//! Compiles textual feature-synthesis expressions into ordered
//! [`FeatureSpec`]s. Each comma-separated term names source columns as
//! `F<n>` (1-based) joined by `+`, `-`, `*` or `=`; term `i` creates column
//! `base_features + i` and may read any column created before it.

mod error;
mod expression;
mod operator;
mod parser;
mod spec;

pub use error::ExprError;
pub use expression::Expression;
pub use operator::Operator;
pub use parser::{compile, TERM_SEPARATOR};
pub use spec::FeatureSpec;
