//! Opaque predictive model capability and the bundled linear artifact format.

pub mod linear;

use std::sync::Arc;

use crate::batch::TabularBatch;
use crate::error::ModelError;

pub use linear::{LinearModel, Link};

/// Anything that can turn a tabular batch into one prediction per row.
///
/// Implementations must be safe for concurrent read-only use; the predictor
/// never locks around a call.
pub trait Model: Send + Sync {
    fn predict(&self, batch: &TabularBatch) -> Result<Vec<f64>, ModelError>;
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn predict(&self, batch: &TabularBatch) -> Result<Vec<f64>, ModelError> {
        (**self).predict(batch)
    }
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn predict(&self, batch: &TabularBatch) -> Result<Vec<f64>, ModelError> {
        (**self).predict(batch)
    }
}

impl<M: Model + ?Sized> Model for &M {
    fn predict(&self, batch: &TabularBatch) -> Result<Vec<f64>, ModelError> {
        (**self).predict(batch)
    }
}
