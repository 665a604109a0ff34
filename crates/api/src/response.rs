//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope.

use serde::Serialize;

use policyscore_core::types::Timestamp;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Prediction for a single record.
#[derive(Debug, Serialize)]
pub struct ItemPrediction {
    pub prediction: f64,
    pub elapsed_ms: f64,
    pub timestamp: Timestamp,
}
