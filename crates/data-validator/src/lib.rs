//! Data Validation
//!
//! Shape and value checks for training matrices and single inference samples.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{MatrixReport, ValidationConfig, Validator};
