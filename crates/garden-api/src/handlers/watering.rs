use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::services::{self, WateringReport};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CalculateRequest {
    /// Restrict the calculation to one floor.
    #[serde(default, alias = "andar")]
    pub floor: Option<i32>,
    /// Send an alert for plants that need water. Defaults to true.
    #[serde(default)]
    pub notify: Option<bool>,
}

#[utoipa::path(post, path = "/api/v1/watering/calculate", tag = "Watering",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Recommendations and alert outcome", body = WateringReport),
        (status = 400, description = "Invalid floor"),
    ))]
pub async fn calculate_watering(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CalculateRequest>,
) -> Result<Json<WateringReport>, ApiError> {
    let report = services::calculate(&state, req.floor, req.notify.unwrap_or(true)).await?;
    Ok(Json(report))
}

/// Same check the background scheduler runs; alerts are throttled by the
/// cooldown window.
#[utoipa::path(post, path = "/api/v1/watering/check", tag = "Watering",
    responses((status = 200, description = "Check result", body = WateringReport)))]
pub async fn check_watering(State(state): State<AppState>) -> Result<Json<WateringReport>, ApiError> {
    Ok(Json(services::scheduled_check(&state).await?))
}
