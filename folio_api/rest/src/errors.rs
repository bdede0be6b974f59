use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiError, ApiSuccess};

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

// Contact
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
pub const FIELD_TOO_LONG: &str = "Field too long";
pub const FAILED_TO_SEND_MESSAGE: &str = "Failed to send message. Please try again later.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (
        code,
        Json(ApiError {
            success: false,
            error,
        }),
    )
        .into_response()
}

pub fn success(message: &'static str) -> Response {
    Json(ApiSuccess {
        success: true,
        message,
    })
    .into_response()
}
