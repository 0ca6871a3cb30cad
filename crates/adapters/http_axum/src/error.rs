//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lumen_domain::error::{AuthError, LumenError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`LumenError`] to an HTTP response with appropriate status code.
pub struct ApiError(LumenError);

impl From<LumenError> for ApiError {
    fn from(err: LumenError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LumenError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            LumenError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            LumenError::Auth(AuthError::NotSignedIn) => {
                (StatusCode::UNAUTHORIZED, "not signed in".to_string())
            }
            LumenError::Auth(err) => {
                tracing::error!(error = %err, "identity provider error");
                (StatusCode::BAD_GATEWAY, "identity provider error".to_string())
            }
            LumenError::Storage(err) => {
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
