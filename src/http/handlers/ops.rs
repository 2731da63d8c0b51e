use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    let status = if db_ok {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "ready": db_ok,
            "db": db_ok,
            "rule_codes": crate::retry::rule_table::known_codes().count()
        })),
    )
        .into_response()
}

pub async fn liveness() -> impl IntoResponse {
    (axum::http::StatusCode::OK, Json(serde_json::json!({"alive": true}))).into_response()
}
