use anyhow::Result;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AlertWebhooksRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AlertWebhook {
    pub id: i64,
    pub event_type: String,
    pub target_url: String,
    pub secret: Option<String>,
}

impl AlertWebhooksRepo {
    /// Enabled subscribers for `event_type`, oldest subscription first.
    pub async fn subscribers(&self, event_type: &str) -> Result<Vec<AlertWebhook>> {
        let hooks = sqlx::query_as::<_, AlertWebhook>(
            r#"
            SELECT id, event_type, target_url, secret
            FROM alert_webhooks
            WHERE is_enabled = true AND event_type = $1
            ORDER BY id ASC
            "#,
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(hooks)
    }
}
