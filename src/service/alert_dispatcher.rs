use crate::repo::alert_webhooks_repo::AlertWebhooksRepo;
use crate::service::collaborators::{AlertSink, RetryAlert};
use anyhow::{bail, Result};

pub const RETRY_ALERT_EVENT: &str = "collection.retry_alert";

/// Posts retry alerts to every enabled webhook subscribed to [`RETRY_ALERT_EVENT`].
#[derive(Clone)]
pub struct WebhookAlertSink {
    pub webhooks_repo: AlertWebhooksRepo,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl AlertSink for WebhookAlertSink {
    async fn send_alert(&self, alert: &RetryAlert) -> Result<()> {
        let hooks = self
            .webhooks_repo
            .subscribers(RETRY_ALERT_EVENT)
            .await?;

        let mut failed = 0usize;
        for hook in &hooks {
            let mut req = self
                .client
                .post(&hook.target_url)
                .header("Content-Type", "application/json")
                .header("X-Event-Type", &hook.event_type)
                .header("X-Idempotency-Key", alert.attempt_id.to_string())
                .json(alert);
            if let Some(secret) = &hook.secret {
                req = req.header("X-Webhook-Secret", secret);
            }

            match req.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => {}
                Err(e) => {
                    failed += 1;
                    tracing::warn!(webhook_id = hook.id, target_url = %hook.target_url, error = %e, "alert webhook failed");
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {} alert webhooks failed", hooks.len());
        }
        Ok(())
    }
}

const ALERT_DEDUP_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Appends retry alerts to a Redis stream for downstream notification workers.
#[derive(Clone)]
pub struct StreamAlertSink {
    pub redis_client: redis::Client,
    pub stream_key: String,
}

#[async_trait::async_trait]
impl AlertSink for StreamAlertSink {
    async fn send_alert(&self, alert: &RetryAlert) -> Result<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let sent_key = format!("{}:sent:{}", self.stream_key, alert.attempt_id);
        let claimed: Option<String> = redis::cmd("SET")
            .arg(&sent_key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ALERT_DEDUP_TTL_SECS)
            .query_async(&mut conn)
            .await?;
        if claimed.is_none() {
            tracing::debug!(attempt_id = %alert.attempt_id, "retry alert already on stream");
            return Ok(());
        }

        let payload = serde_json::to_string(alert)?;
        let _: String = redis::cmd("XADD")
            .arg(&self.stream_key)
            .arg("MAXLEN")
            .arg("~")
            .arg(1_000_000)
            .arg("*")
            .arg("event")
            .arg(RETRY_ALERT_EVENT)
            .arg("payload")
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}
