use crate::http::error::{internal, ErrorEnvelope};
use crate::service::collaborators::AttemptStore;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RecordFailureRequest {
    pub failure_code: i32,
    pub reference_time: Option<DateTime<Utc>>,
}

pub async fn resolve_failure(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
    Json(req): Json<RecordFailureRequest>,
) -> impl IntoResponse {
    let attempt = match state.attempts_repo.get(attempt_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorEnvelope::new("ATTEMPT_NOT_FOUND", "attempt not found")),
            )
                .into_response()
        }
        Err(e) => return internal(e),
    };

    let reference_time = req.reference_time.unwrap_or_else(Utc::now);
    match state
        .orchestrator
        .resolve_retry(&attempt, req.failure_code, reference_time)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_attempt(
    State(state): State<AppState>,
    Path(attempt_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.attempts_repo.get(attempt_id).await {
        Ok(Some(a)) => (StatusCode::OK, Json(a)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorEnvelope::new("ATTEMPT_NOT_FOUND", "attempt not found")),
        )
            .into_response(),
        Err(e) => internal(e),
    }
}

pub async fn list_obligation_attempts(
    State(state): State<AppState>,
    Path(obligation_id): Path<Uuid>,
) -> impl IntoResponse {
    let attempts = match state.attempts_repo.list_for_obligation(obligation_id).await {
        Ok(v) => v,
        Err(e) => return internal(e),
    };

    let latest_status = attempts
        .last()
        .map(|a| a.status.as_str())
        .unwrap_or("UNKNOWN");

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "obligation_id": obligation_id,
            "total_attempts": attempts.len(),
            "latest_status": latest_status,
            "attempts": attempts
        })),
    )
        .into_response()
}
