//! Policy scoring core: field-rule validation in front of an opaque model.
//!
//! No transport or process concerns live here; the API crate builds a
//! [`ValidatingPredictor`] at startup and shares it across requests.

pub mod batch;
pub mod error;
pub mod model;
pub mod policy;
pub mod predictor;
pub mod sentinel;
pub mod types;
pub mod validation;

pub use batch::TabularBatch;
pub use error::{CoreError, ModelError, PredictError, ValidationError};
pub use model::Model;
pub use predictor::{PredictionResult, ValidatingPredictor};
