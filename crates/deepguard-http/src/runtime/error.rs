//! Error mapping at the transport boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use deepguard_core::AnalysisError;

/// JSON error body. The browser UI reads a single `error` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Transport wrapper that picks the status code for an [`AnalysisError`]:
/// validation failures are 400, everything else is 500 with the underlying
/// message passed through verbatim.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl<E> From<E> for ApiError
where
    E: Into<AnalysisError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = self.0.to_string();

        if status.is_client_error() {
            debug!(%status, message, "request rejected");
        } else {
            error!(%status, message, "analysis failed");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
