//! JSON REST handlers for the stock screen.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use lendstock_app::ports::{DataGateway, IntegrityReporter};
use lendstock_domain::equipment::Equipment;
use lendstock_domain::id::EquipmentId;

use super::path_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an equipment item.
#[derive(Deserialize)]
pub struct CreateEquipmentRequest {
    pub name: String,
    #[serde(default)]
    pub available_count: i64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Equipment>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the count adjustment endpoints.
pub enum AdjustResponse {
    Ok(Json<Equipment>),
}

impl IntoResponse for AdjustResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Equipment>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/equipment`
///
/// Refreshes the shared inventory snapshot and returns it.
pub async fn list<G, R>(State(state): State<AppState<G, R>>) -> Result<ListResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let mut inventory = state.inventory.write().await;
    let snapshot = inventory.refresh().await?.to_vec();
    Ok(ListResponse::Ok(Json(snapshot)))
}

/// `POST /api/equipment`
pub async fn create<G, R>(
    State(state): State<AppState<G, R>>,
    body: Result<Json<CreateEquipmentRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let Json(req) = body?;
    let created = state
        .equipment_service
        .create_equipment(&req.name, req.available_count)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `POST /api/equipment/{id}/increment`
pub async fn increment<G, R>(
    State(state): State<AppState<G, R>>,
    Path(id): Path<String>,
) -> Result<AdjustResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let id: EquipmentId = path_id(&id)?;
    let updated = state.equipment_service.increment(id).await?;
    Ok(AdjustResponse::Ok(Json(updated)))
}

/// `POST /api/equipment/{id}/decrement`
pub async fn decrement<G, R>(
    State(state): State<AppState<G, R>>,
    Path(id): Path<String>,
) -> Result<AdjustResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let id: EquipmentId = path_id(&id)?;
    let updated = state.equipment_service.decrement(id).await?;
    Ok(AdjustResponse::Ok(Json(updated)))
}

/// `DELETE /api/equipment/{id}`
pub async fn delete<G, R>(
    State(state): State<AppState<G, R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let id: EquipmentId = path_id(&id)?;
    state.equipment_service.delete_equipment(id).await?;
    Ok(DeleteResponse::NoContent)
}
