//! Handlers for single-record and batch predictions.
//!
//! Records are flat JSON objects of feature name to number (or `null`). Each
//! request becomes one tabular batch that is validated against the rule
//! registry before the model sees it.

use axum::extract::State;
use axum::Json;
use policyscore_core::types::Record;
use policyscore_core::{ModelError, PredictionResult, TabularBatch};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::{DataResponse, ItemPrediction};
use crate::state::AppState;

/// POST /api/v1/predict_item
///
/// Validate and score one record.
pub async fn predict_item(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<Record>,
) -> AppResult<Json<DataResponse<ItemPrediction>>> {
    let batch = TabularBatch::from_records(std::slice::from_ref(&record))?;
    let result = state.predictor.predict(&batch)?;

    let prediction = result
        .predictions
        .first()
        .copied()
        .ok_or(ModelError::LengthMismatch {
            expected: 1,
            got: 0,
        })?;

    Ok(Json(DataResponse {
        data: ItemPrediction {
            prediction,
            elapsed_ms: result.elapsed_ms,
            timestamp: result.timestamp,
        },
    }))
}

/// POST /api/v1/predict_batch
///
/// Validate and score an array of records. The whole batch is rejected if any
/// record violates a rule; predictions come back in request order.
pub async fn predict_batch(
    State(state): State<AppState>,
    ApiJson(records): ApiJson<Vec<Record>>,
) -> AppResult<Json<DataResponse<PredictionResult>>> {
    if records.is_empty() {
        return Err(AppError::BadRequest(
            "records array must not be empty".to_string(),
        ));
    }

    let batch = TabularBatch::from_records(&records)?;
    let result = state.predictor.predict(&batch)?;

    Ok(Json(DataResponse { data: result }))
}
