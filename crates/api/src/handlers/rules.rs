//! Read-only view of the active validation rules.

use axum::extract::State;
use axum::Json;
use policyscore_core::validation::FieldRule;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// One registered rule, flattened with its field name.
#[derive(Debug, Serialize)]
pub struct RuleView {
    pub field: String,
    #[serde(flatten)]
    pub rule: FieldRule,
}

/// GET /api/v1/rules
///
/// List the active rules in check order.
pub async fn list_rules(State(state): State<AppState>) -> Json<DataResponse<Vec<RuleView>>> {
    let rules = state
        .predictor
        .rules()
        .iter()
        .map(|(field, rule)| RuleView {
            field: field.to_string(),
            rule: rule.clone(),
        })
        .collect();

    Json(DataResponse { data: rules })
}
