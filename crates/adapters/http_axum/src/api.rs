//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod equipment;
#[allow(clippy::missing_errors_doc)]
pub mod lenders;
#[allow(clippy::missing_errors_doc)]
pub mod rentals;

use std::str::FromStr;

use axum::Router;
use axum::routing::{delete, get, post};

use lendstock_app::ports::{DataGateway, IntegrityReporter};
use lendstock_domain::error::ValidationError;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse an identifier taken from the URL path.
fn path_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ValidationError::InvalidId { field: "id" }.into())
}

/// Build the `/api` sub-router.
pub fn routes<G, R>() -> Router<AppState<G, R>>
where
    G: DataGateway + Send + Sync + 'static,
    R: IntegrityReporter + Send + Sync + 'static,
{
    Router::new()
        // Equipment
        .route(
            "/equipment",
            get(equipment::list::<G, R>).post(equipment::create::<G, R>),
        )
        .route("/equipment/{id}", delete(equipment::delete::<G, R>))
        .route(
            "/equipment/{id}/increment",
            post(equipment::increment::<G, R>),
        )
        .route(
            "/equipment/{id}/decrement",
            post(equipment::decrement::<G, R>),
        )
        // Lenders
        .route(
            "/lenders",
            get(lenders::list::<G, R>).post(lenders::create::<G, R>),
        )
        // Rentals
        .route(
            "/rentals",
            get(rentals::list::<G, R>).post(rentals::create::<G, R>),
        )
        .route("/rentals/{id}", delete(rentals::cancel::<G, R>))
}
