use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use collections_retry::config::{AlertSinkKind, AppConfig};
use collections_retry::repo::alert_webhooks_repo::AlertWebhooksRepo;
use collections_retry::repo::attempts_repo::AttemptsRepo;
use collections_retry::repo::billing_repo::BillingRepo;
use collections_retry::retry::engine::RetryEngine;
use collections_retry::service::alert_dispatcher::{StreamAlertSink, WebhookAlertSink};
use collections_retry::service::collaborators::AlertSink;
use collections_retry::service::retry_orchestrator::RetryOrchestrator;
use collections_retry::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let attempts_repo = AttemptsRepo { pool: pool.clone() };
    let billing_repo = Arc::new(BillingRepo { pool: pool.clone() });

    let alerts: Arc<dyn AlertSink> = match cfg.alert_sink {
        AlertSinkKind::Webhook => Arc::new(WebhookAlertSink {
            webhooks_repo: AlertWebhooksRepo { pool: pool.clone() },
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_millis(cfg.alert_timeout_ms))
                .build()?,
        }),
        AlertSinkKind::RedisStream => Arc::new(StreamAlertSink {
            redis_client: redis::Client::open(cfg.redis_url.clone())?,
            stream_key: cfg.alert_stream_key.clone(),
        }),
    };

    let orchestrator = RetryOrchestrator {
        engine: RetryEngine::new(cfg.overrides.clone()),
        attempts: Arc::new(attempts_repo.clone()),
        obligations: billing_repo.clone(),
        accounts: billing_repo,
        alerts,
    };

    let state = AppState {
        orchestrator,
        attempts_repo,
        pool,
    };

    let admin_routes = Router::new()
        .route(
            "/attempts/:attempt_id/failures",
            post(collections_retry::http::handlers::attempts::resolve_failure),
        )
        .layer(from_fn_with_state(
            cfg.internal_api_key.clone(),
            collections_retry::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route(
            "/attempts/:attempt_id",
            get(collections_retry::http::handlers::attempts::get_attempt),
        )
        .route(
            "/obligations/:obligation_id/attempts",
            get(collections_retry::http::handlers::attempts::list_obligation_attempts),
        )
        .route("/ops/readiness", get(collections_retry::http::handlers::ops::readiness))
        .route("/ops/liveness", get(collections_retry::http::handlers::ops::liveness))
        .merge(admin_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        bind_addr = %cfg.bind_addr,
        alert_sink = ?cfg.alert_sink,
        "collections retry service listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
