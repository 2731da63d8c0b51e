pub mod config;
pub mod domain {
    pub mod attempt;
    pub mod decision;
    pub mod failure;
}
pub mod http {
    pub mod error;
    pub mod handlers {
        pub mod attempts;
        pub mod ops;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
}
pub mod repo {
    pub mod alert_webhooks_repo;
    pub mod attempts_repo;
    pub mod billing_repo;
}
pub mod retry {
    pub mod bucket;
    pub mod engine;
    pub mod error;
    pub mod overrides;
    pub mod rule_table;
    pub mod schedule;
}
pub mod service {
    pub mod alert_dispatcher;
    pub mod collaborators;
    pub mod retry_orchestrator;
}

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: service::retry_orchestrator::RetryOrchestrator,
    pub attempts_repo: repo::attempts_repo::AttemptsRepo,
    pub pool: sqlx::PgPool,
}
