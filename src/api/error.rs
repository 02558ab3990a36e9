use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

/// Message returned for every request-level failure. Details stay in the
/// logs.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug)]
pub enum ApiError {
    /// 500 - anything that stops a reply before streaming starts
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Internal(detail) = self;
        tracing::error!(error = %detail, "request failed");

        let body = ErrorBody {
            error: "internal_error",
            message: GENERIC_ERROR_MESSAGE,
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
