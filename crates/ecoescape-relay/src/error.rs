//! Error types for the relay API.
//!
//! [`RelayError`] converts into a JSON HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Device
//! reports never produce one: `/update` always acknowledges.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the relay API layer.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// No route matches the request path.
    #[error("not found: {0}")]
    NotFound(String),

    /// A frame could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(path) => (StatusCode::NOT_FOUND, format!("no route for {path}")),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
