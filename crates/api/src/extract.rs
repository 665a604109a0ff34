//! Request extractors whose rejections use the [`AppError`] JSON envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json`, but a malformed or mistyped body becomes a 400
/// `BAD_REQUEST` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
