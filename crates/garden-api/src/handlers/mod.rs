//! HTTP handlers.

pub mod care;
pub mod health;
pub mod notify;
pub mod plants;
pub mod sensors;
pub mod watering;

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;

/// Response carrying only a human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Answer for a bare `OPTIONS` request. Real preflights are answered by the
/// CORS layer before routing.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
