use crate::domain::attempt::{AttemptDraft, AttemptRecord};
use crate::domain::failure::TimeBucket;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait ObligationSource: Send + Sync {
    async fn days_overdue(&self, obligation_id: Uuid, as_of: NaiveDate) -> Result<i64>;
}

#[async_trait::async_trait]
pub trait AccountSource: Send + Sync {
    async fn balance_due_date(&self, account_id: Uuid) -> Result<Option<NaiveDate>>;
}

#[async_trait::async_trait]
pub trait AttemptStore: Send + Sync {
    async fn get(&self, attempt_id: Uuid) -> Result<Option<AttemptRecord>>;

    async fn find_successor(&self, predecessor_id: Uuid) -> Result<Option<AttemptRecord>>;

    /// Returns `None` when a successor for the same predecessor already exists.
    async fn create_attempt(&self, draft: AttemptDraft) -> Result<Option<AttemptRecord>>;

    async fn list_for_obligation(&self, obligation_id: Uuid) -> Result<Vec<AttemptRecord>>;

    /// Marks the retry alert for `attempt_id` as sent. Returns `false` if it already was.
    async fn record_alert(&self, attempt_id: Uuid) -> Result<bool>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryAlert {
    pub attempt_id: Uuid,
    pub obligation_id: Uuid,
    pub account_id: Uuid,
    pub failure_code: i32,
    pub bucket: TimeBucket,
    pub retry_count: i32,
    pub raised_at: DateTime<Utc>,
}

/// Delivery must tolerate duplicates of the same `attempt_id`.
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    async fn send_alert(&self, alert: &RetryAlert) -> Result<()>;
}
