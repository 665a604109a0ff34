#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use policyscore_api::config::ServerConfig;
use policyscore_api::router::build_app_router;
use policyscore_api::state::{AppState, Predictor};
use policyscore_core::model::{LinearModel, Link, Model};
use policyscore_core::policy::{self, FEATURES};
use policyscore_core::sentinel::MissingSentinel;
use policyscore_core::ValidatingPredictor;

/// Year used as the policy-year upper bound in tests.
pub const TEST_YEAR: i32 = 2024;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        model_path: "model.json".into(),
        rules_path: None,
        missing_sentinel: Some(MissingSentinel::default()),
    }
}

/// Linear model over all policy features: predicts `1.0` when the insured
/// value is at least 5000, `0.0` otherwise.
pub fn test_model() -> LinearModel {
    let features: Vec<String> = FEATURES.iter().map(|f| f.to_string()).collect();
    let coefficients = features
        .iter()
        .map(|f| if f == policy::INSURED_VALUE { 1.0 } else { 0.0 })
        .collect();
    LinearModel::new(features, coefficients, -5000.0, Link::Identity)
        .and_then(|m| m.with_threshold(0.0))
        .and_then(|m| m.with_imputation(policy::PREMIUM, 0.0))
        .and_then(|m| m.with_imputation(policy::SEATS_NUM, 0.0))
        .and_then(|m| m.with_imputation(policy::CARRYING_CAPACITY, 0.0))
        .unwrap()
}

pub fn test_predictor(model: Box<dyn Model>) -> Predictor {
    ValidatingPredictor::new(model, policy::default_registry(TEST_YEAR).unwrap())
        .with_missing_sentinel(MissingSentinel::default())
}

/// Build the full application router around `predictor`, using the same
/// middleware stack as production.
pub fn build_test_app_with(predictor: Predictor) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), predictor);
    build_app_router(state, &config).unwrap()
}

/// Build the full application router around the default test model.
pub fn build_test_app() -> Router {
    build_test_app_with(test_predictor(Box::new(test_model())))
}

/// A record that satisfies every built-in policy rule.
pub fn valid_record() -> Value {
    json!({
        "SEX": 0,
        "INSR_TYPE": 1201,
        "CUSTOMER_SENIORITY": 5,
        "INSURED_VALUE": 1000,
        "PREMIUM": 50,
        "PROD_YEAR": 2020,
        "SEATS_NUM": 5,
        "CARRYING_CAPACITY": 500,
        "CCM_TON": 1.2,
        "MONTH_BEGIN": 3,
        "MONTH_END": 3,
        "YEAR_BEGIN": 2023,
        "YEAR_END": 2024
    })
}

/// [`valid_record`] with one field overridden.
pub fn record_with(field: &str, value: Value) -> Value {
    let mut record = valid_record();
    record[field] = value;
    record
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
