//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use costrecon_shared::AppError;
use serde_json::json;
use tracing::error;

/// Converts an `AppError` into a JSON error response.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.message()
        })),
    )
        .into_response()
}
