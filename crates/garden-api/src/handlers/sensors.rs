//! Sensor readings and device discovery.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use garden_core::{Error, SensorReading, SensorSource};
use garden_sensors::DeviceListing;

use crate::error::ApiError;
use crate::state::AppState;

const CREDENTIALS_HELP: &str =
    "Check EWELINK_EMAIL, EWELINK_PASSWORD, EWELINK_APP_ID and EWELINK_APP_SECRET";

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SensorsQuery {
    /// `devices` returns the device listing instead of readings.
    pub list: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SensorsResponse {
    /// Readings keyed by floor number.
    pub sensors: BTreeMap<i32, SensorReading>,
    pub source: SensorSource,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// 401 body for failed eWeLink sign-in.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthHelpResponse {
    pub error: String,
    pub help: String,
}

#[utoipa::path(get, path = "/api/v1/sensors", tag = "Sensors",
    params(SensorsQuery),
    responses(
        (status = 200, description = "Current reading per floor", body = SensorsResponse),
        (status = 401, description = "Device listing requested and sign-in failed", body = AuthHelpResponse),
    ))]
pub async fn get_sensors(
    State(state): State<AppState>,
    Query(query): Query<SensorsQuery>,
) -> Result<Response, ApiError> {
    if query.list.as_deref() == Some("devices") {
        return list_devices(State(state)).await;
    }

    let snapshot = state.sensors.read().await?;
    Ok(Json(SensorsResponse {
        sensors: snapshot.readings,
        source: snapshot.source,
        timestamp: snapshot.taken_at,
        note: snapshot.note,
    })
    .into_response())
}

#[utoipa::path(get, path = "/api/v1/sensors/devices", tag = "Sensors",
    responses(
        (status = 200, description = "Devices on the eWeLink account", body = DeviceListing),
        (status = 401, description = "Missing or rejected credentials", body = AuthHelpResponse),
    ))]
pub async fn list_devices(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.ewelink.describe_devices().await {
        Ok(listing) => Ok(Json(listing).into_response()),
        Err(e @ (Error::Config(_) | Error::Unauthorized(_))) => {
            warn!(subsystem = "api", op = "list_devices", error = %e, "eWeLink sign-in failed");
            Ok((
                StatusCode::UNAUTHORIZED,
                Json(AuthHelpResponse {
                    error: e.to_string(),
                    help: CREDENTIALS_HELP.to_string(),
                }),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
