//! Error types for the HTTP layer.
//!
//! [`ApiError`] converts into an Axum response with a small JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wildhold_core::GameError;

/// Errors that can occur while serving an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The game actor could not answer.
    #[error("game unavailable: {0}")]
    GameUnavailable(#[from] GameError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::GameUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
