pub mod health;
pub mod prediction;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /predict_item                                    score one record (POST)
/// /predict_batch                                   score an array of records (POST)
/// /rules                                           active validation rules (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(prediction::router())
}
