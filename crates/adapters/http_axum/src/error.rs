//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lendstock_domain::error::{ErrorKind, LendError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: ErrorKind,
}

/// Maps [`LendError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(LendError);

impl From<LendError> for ApiError {
    fn from(err: LendError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LendError::Validation(_) => StatusCode::BAD_REQUEST,
            LendError::NotFound(_) => StatusCode::NOT_FOUND,
            LendError::OutOfStock(_) => StatusCode::CONFLICT,
            LendError::Remote(err) => {
                tracing::error!(code = %err.code, message = %err.message, "store rejected request");
                StatusCode::BAD_GATEWAY
            }
            LendError::Network(err) => {
                tracing::error!(error = %err, "store unreachable");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = ErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}
