//! Validate-then-predict wrapper around an opaque [`Model`].

use std::time::Instant;

use serde::Serialize;

use crate::batch::TabularBatch;
use crate::error::{ModelError, PredictError, ValidationError};
use crate::model::Model;
use crate::sentinel::MissingSentinel;
use crate::types::Timestamp;
use crate::validation::evaluator::evaluate_batch;
use crate::validation::RuleRegistry;

/// Predictions for one batch, index-aligned with its rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predictions: Vec<f64>,
    /// Wall time spent validating and predicting, in milliseconds.
    pub elapsed_ms: f64,
    /// Completion time.
    pub timestamp: Timestamp,
}

/// Enforces the rule registry before every call to the wrapped model.
///
/// Holds no interior mutability; share it behind an `Arc` across workers.
#[derive(Debug)]
pub struct ValidatingPredictor<M> {
    model: M,
    rules: RuleRegistry,
    sentinel: Option<MissingSentinel>,
}

impl<M: Model> ValidatingPredictor<M> {
    pub fn new(model: M, rules: RuleRegistry) -> Self {
        Self {
            model,
            rules,
            sentinel: None,
        }
    }

    /// Treat cells equal to `sentinel` as missing before validation.
    pub fn with_missing_sentinel(mut self, sentinel: MissingSentinel) -> Self {
        self.sentinel = Some(sentinel);
        self
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn missing_sentinel(&self) -> Option<MissingSentinel> {
        self.sentinel
    }

    /// Check every row of `batch` against every rule, in registry order.
    pub fn validate(&self, batch: &TabularBatch) -> Result<(), ValidationError> {
        evaluate_batch(&self.rules, batch)
    }

    /// Validate `batch` and, if it conforms, run the model on it.
    pub fn predict(&self, batch: &TabularBatch) -> Result<PredictionResult, PredictError> {
        let batch = match &self.sentinel {
            Some(sentinel) => sentinel.normalize(batch),
            None => std::borrow::Cow::Borrowed(batch),
        };

        let start = Instant::now();

        if let Err(err) = self.validate(&batch) {
            tracing::debug!(field = err.field(), violation = err.kind(), "Batch rejected");
            return Err(err.into());
        }

        let predictions = self.model.predict(&batch)?;
        if predictions.len() != batch.len() {
            return Err(ModelError::LengthMismatch {
                expected: batch.len(),
                got: predictions.len(),
            }
            .into());
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(rows = batch.len(), elapsed_ms, "Batch predicted");

        Ok(PredictionResult {
            predictions,
            elapsed_ms,
            timestamp: chrono::Utc::now(),
        })
    }
}
