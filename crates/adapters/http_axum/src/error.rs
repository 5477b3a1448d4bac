//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use fleet_domain::error::{FleetError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`FleetError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(FleetError);

impl ApiError {
    /// Reject a path segment that is not a valid numeric id.
    pub(crate) fn invalid_id(raw: &str) -> Self {
        Self(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            FleetError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            FleetError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            FleetError::DuplicatePlate(err) => (StatusCode::CONFLICT, err.to_string()),
            FleetError::UpdateFailed(err) => (StatusCode::CONFLICT, err.to_string()),
            FleetError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
