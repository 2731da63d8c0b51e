use crate::http::error::ErrorEnvelope;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

/// Guards routes that write attempt records.
pub async fn require_internal_api_key(
    State(expected): State<String>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(INTERNAL_API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    if provided != Some(expected.as_str()) {
        tracing::warn!(path = %request.uri().path(), "rejected request without valid internal api key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorEnvelope::new("UNAUTHORIZED", "missing or invalid internal api key")),
        )
            .into_response();
    }

    next.run(request).await
}
