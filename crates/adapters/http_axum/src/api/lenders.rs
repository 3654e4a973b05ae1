//! JSON REST handlers for the lender picker.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use lendstock_app::ports::{DataGateway, IntegrityReporter};
use lendstock_domain::person::Person;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a lender.
#[derive(Deserialize)]
pub struct RegisterLenderRequest {
    pub name: String,
    pub email: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Person>>),
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
    Created(Json<Person>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/lenders`
pub async fn list<G, R>(State(state): State<AppState<G, R>>) -> Result<ListResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let lenders = state.person_service.list_lenders().await?;
    Ok(ListResponse::Ok(Json(lenders)))
}

/// `POST /api/lenders`
pub async fn create<G, R>(
    State(state): State<AppState<G, R>>,
    body: Result<Json<RegisterLenderRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    let Json(req) = body?;
    let lender = state
        .person_service
        .register_lender(&req.name, req.email.as_deref())
        .await?;
    Ok(CreateResponse::Created(Json(lender)))
}
