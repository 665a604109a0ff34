//! Route definitions for prediction and rule inspection.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{prediction, rules};
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// POST   /predict_item    -> predict_item
/// POST   /predict_batch   -> predict_batch
/// GET    /rules           -> list_rules
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/predict_item", post(prediction::predict_item))
        .route("/predict_batch", post(prediction::predict_batch))
        .route("/rules", get(rules::list_rules))
}
