use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    ErrorResponse {
        detail: detail.into(),
    }
    .into_response_with(status)
}
