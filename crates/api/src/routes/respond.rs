//! Shared error → HTTP response mapping.
//!
//! One mapping for all kinds, so equivalent failures always produce the
//! same status and error code whichever entity the request touched.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use mondera_db::MasterError;
use mondera_shared::AppError;

/// Renders an engine failure as a JSON error response.
pub fn error_response(err: MasterError, action: &str) -> Response {
    let app: AppError = err.into();

    if app.is_retryable() {
        error!(error = %app, action, "master-data operation failed");
    } else {
        warn!(code = app.error_code(), action, "master-data operation rejected");
    }

    let status =
        StatusCode::from_u16(app.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // Infrastructure details stay in the logs.
    let message = if app.is_retryable() {
        "An internal error occurred".to_string()
    } else {
        app.to_string()
    };

    (
        status,
        Json(json!({ "error": app.error_code(), "message": message })),
    )
        .into_response()
}

/// Renders request-shape validation failures.
pub fn validation_response(errors: &validator::ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_FAILED",
            "message": "Invalid input",
            "details": errors,
        })),
    )
        .into_response()
}
