//! Plant CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use garden_core::{CreatePlantRequest, PlantRecord, UpdatePlantRequest};

use super::MessageResponse;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PlantListResponse {
    pub plants: Vec<PlantRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlantResponse {
    pub plant: PlantRecord,
    pub message: String,
}

#[utoipa::path(get, path = "/api/v1/plants", tag = "Plants",
    responses((status = 200, description = "All plants by floor and slot", body = PlantListResponse)))]
pub async fn list_plants(
    State(state): State<AppState>,
) -> Result<Json<PlantListResponse>, ApiError> {
    let plants = state.plants.list().await?;
    Ok(Json(PlantListResponse { plants }))
}

#[utoipa::path(post, path = "/api/v1/plants", tag = "Plants",
    request_body = CreatePlantRequest,
    responses(
        (status = 201, description = "Plant created", body = PlantResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 409, description = "Slot already occupied"),
    ))]
pub async fn create_plant(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreatePlantRequest>,
) -> Result<(StatusCode, Json<PlantResponse>), ApiError> {
    let new_plant = req.validate()?;
    let plant = state.plants.insert(new_plant).await?;

    info!(
        subsystem = "api",
        op = "create_plant",
        plant_id = %plant.id,
        floor = plant.floor,
        slot = plant.slot_index,
        "Plant created"
    );

    Ok((
        StatusCode::CREATED,
        Json(PlantResponse {
            plant,
            message: "Planta adicionada com sucesso".to_string(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/v1/plants/{id}", tag = "Plants",
    params(("id" = String, Path, description = "Plant id")),
    responses(
        (status = 200, description = "The plant", body = PlantRecord),
        (status = 404, description = "Unknown id"),
    ))]
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlantRecord>, ApiError> {
    Ok(Json(state.plants.get(&id).await?))
}

#[utoipa::path(put, path = "/api/v1/plants/{id}", tag = "Plants",
    params(("id" = String, Path, description = "Plant id")),
    request_body = UpdatePlantRequest,
    responses(
        (status = 200, description = "Plant updated", body = PlantResponse),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown id"),
        (status = 409, description = "Target slot already occupied"),
    ))]
pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdatePlantRequest>,
) -> Result<Json<PlantResponse>, ApiError> {
    req.validate()?;
    let plant = state.plants.update(&id, req).await?;
    info!(subsystem = "api", op = "update_plant", plant_id = %plant.id, "Plant updated");
    Ok(Json(PlantResponse {
        plant,
        message: "Planta atualizada".to_string(),
    }))
}

#[utoipa::path(delete, path = "/api/v1/plants/{id}", tag = "Plants",
    params(("id" = String, Path, description = "Plant id")),
    responses(
        (status = 200, description = "Plant removed", body = MessageResponse),
        (status = 404, description = "Unknown id"),
    ))]
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.plants.delete(&id).await?;
    info!(subsystem = "api", op = "delete_plant", plant_id = %id, "Plant removed");
    Ok(Json(MessageResponse {
        message: "Planta removida com sucesso".to_string(),
    }))
}
