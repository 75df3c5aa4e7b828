//! Care profile and care guide lookups.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use garden_core::{CareSourceKind, PlantCareGuide, ResolvedCare};
use garden_inference::generate_care_guide;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CareRequest {
    #[serde(default, alias = "nome", alias = "plantName")]
    pub name: Option<String>,
}

impl CareRequest {
    fn plant_name(&self) -> Result<&str, ApiError> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::BadRequest("plant name is required".to_string()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CareGuideResponse {
    #[serde(flatten)]
    pub guide: PlantCareGuide,
    pub source: CareSourceKind,
    pub plant_name: String,
}

#[utoipa::path(post, path = "/api/v1/care/lookup", tag = "Care",
    request_body = CareRequest,
    responses(
        (status = 200, description = "Profile from the catalog, the AI or the generic default", body = ResolvedCare),
        (status = 400, description = "Empty plant name"),
    ))]
pub async fn lookup_care(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CareRequest>,
) -> Result<Json<ResolvedCare>, ApiError> {
    let name = req.plant_name()?;
    Ok(Json(state.resolver.resolve(name).await))
}

#[utoipa::path(post, path = "/api/v1/care/guide", tag = "Care",
    request_body = CareRequest,
    responses(
        (status = 200, description = "Detailed care guide", body = CareGuideResponse),
        (status = 400, description = "Empty plant name"),
    ))]
pub async fn care_guide(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CareRequest>,
) -> Result<Json<CareGuideResponse>, ApiError> {
    let name = req.plant_name()?;

    let generated = match state.guide_backend.as_deref() {
        Some(backend) => generate_care_guide(backend, name).await,
        None => None,
    };

    let (guide, source) = match generated {
        Some(guide) => (guide, CareSourceKind::Ai),
        None => (PlantCareGuide::generic(name), CareSourceKind::Default),
    };

    info!(
        subsystem = "api",
        op = "care_guide",
        plant_name = %name,
        source = %source,
        "Care guide served"
    );

    Ok(Json(CareGuideResponse {
        guide,
        source,
        plant_name: name.to_string(),
    }))
}
