//! JSON REST handlers for rentals.
//!
//! Creating or cancelling a rental changes stock, so both refresh the shared
//! inventory snapshot before answering.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use lendstock_app::ports::{DataGateway, IntegrityReporter};
use lendstock_app::services::cancellation_workflow::Cancellation;
use lendstock_domain::id::{EquipmentId, RentalId};
use lendstock_domain::rental::{Rental, RentalDetails, RentalRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of the cancel endpoint.
#[derive(Deserialize)]
pub struct CancelParams {
    #[serde(default)]
    pub equipment_id: String,
}

/// Body returned once a rental is cancelled.
#[derive(Serialize)]
pub struct CancelledRental {
    pub rental_id: RentalId,
    pub equipment_id: EquipmentId,
    pub available_count: u32,
}

impl From<Cancellation> for CancelledRental {
    fn from(value: Cancellation) -> Self {
        Self {
            rental_id: value.rental_id,
            equipment_id: value.equipment_id,
            available_count: value.available_count,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<RentalDetails>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Rental>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the cancel endpoint.
pub enum CancelResponse {
    Ok(Json<CancelledRental>),
}

impl IntoResponse for CancelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/rentals`
pub async fn list<G, R>(State(state): State<AppState<G, R>>) -> Result<ListResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let rentals = state.rental_workflow.list_rentals().await?;
    Ok(ListResponse::Ok(Json(rentals)))
}

/// `POST /api/rentals`
pub async fn create<G, R>(
    State(state): State<AppState<G, R>>,
    body: Result<Json<RentalRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let Json(req) = body?;
    let rental = state.rental_workflow.create_rental(&req).await?;
    state.refresh_inventory().await;
    Ok(CreateResponse::Created(Json(rental)))
}

/// `DELETE /api/rentals/{id}?equipment_id=…`
pub async fn cancel<G, R>(
    State(state): State<AppState<G, R>>,
    Path(id): Path<String>,
    Query(params): Query<CancelParams>,
) -> Result<CancelResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let cancelled = state
        .cancellation_workflow
        .cancel_rental(&id, &params.equipment_id)
        .await?;
    state.refresh_inventory().await;
    Ok(CancelResponse::Ok(Json(cancelled.into())))
}
