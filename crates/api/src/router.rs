//! Application router and its middleware.
//!
//! `main.rs` and the integration tests both go through [`build_app_router`],
//! so tests exercise the production middleware.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::config::{ConfigError, ServerConfig};
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Preflight responses may be cached this long.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Mount `/health` at the root and the scoring API under `/api/v1`, wrapped
/// in the service middleware.
///
/// Layers run top to bottom on the way in: CORS, request id assignment,
/// tracing, request id propagation, timeout, panic recovery.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(build_cors_layer(config)?)
        .map_response(|res: axum::response::Response<_>| res.map(axum::body::Body::new))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(CatchPanicLayer::new());

    Ok(Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(middleware)
        .with_state(state))
}

/// CORS for the scoring API: `GET` and `POST` with a JSON body.
///
/// A `*` entry in `CORS_ORIGINS` allows any origin without credentials;
/// otherwise each entry must be a valid origin header value.
pub fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(CORS_MAX_AGE);

    if config.cors_origins.iter().any(|o| o == "*") {
        return Ok(base.allow_origin(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError {
                var: "CORS_ORIGINS",
                expected: "a comma-separated list of origins or *",
                value: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(base.allow_origin(origins).allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            request_timeout_secs: 30,
            model_path: "model.json".into(),
            rules_path: None,
            missing_sentinel: None,
        }
    }

    #[test]
    fn listed_origins_are_accepted() {
        let config = config_with_origins(&["http://localhost:5173", "https://app.example.com"]);
        assert!(build_cors_layer(&config).is_ok());
    }

    #[test]
    fn wildcard_origin_is_accepted() {
        assert!(build_cors_layer(&config_with_origins(&["*"])).is_ok());
    }

    #[test]
    fn unprintable_origin_is_a_config_error() {
        let err = build_cors_layer(&config_with_origins(&["http://bad\norigin"])).unwrap_err();
        assert_eq!(err.var, "CORS_ORIGINS");
        assert_eq!(err.value, "http://bad\norigin");
    }
}
