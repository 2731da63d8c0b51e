use crate::retry::error::RetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

pub fn status_for(err: &RetryError) -> StatusCode {
    match err {
        RetryError::UnknownFailureCode(_) | RetryError::InvalidDaysOverdue(_) => StatusCode::BAD_REQUEST,
        RetryError::RetryNotPossible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RetryError::AttemptNotFound(_) => StatusCode::NOT_FOUND,
        RetryError::FailureCodeMismatch { .. } => StatusCode::CONFLICT,
        RetryError::MissingContext { .. } => StatusCode::SERVICE_UNAVAILABLE,
        RetryError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RetryError {
    fn into_response(self) -> Response {
        (status_for(&self), Json(ErrorEnvelope::new(self.code(), self.to_string()))).into_response()
    }
}

pub fn internal(e: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new("INTERNAL_ERROR", e.to_string())),
    )
        .into_response()
}
