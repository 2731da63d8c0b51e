use crate::domain::attempt::{AttemptDraft, AttemptRecord, AttemptStatus, PaymentTrack};
use crate::domain::decision::{MethodDirective, RoutingExclusion};
use crate::service::collaborators::AttemptStore;
use anyhow::{anyhow, Result};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct AttemptsRepo {
    pub pool: PgPool,
}

const ATTEMPT_COLUMNS: &str = "attempt_id, obligation_id, account_id, predecessor_id, retry_sequence, status, \
     payment_track, method_directive, scheduled_for, failure_code, routing_exclusions, created_at";

fn from_row(row: PgRow) -> Result<AttemptRecord> {
    let status: String = row.get("status");
    let track: String = row.get("payment_track");
    let directive: Option<String> = row.get("method_directive");
    let exclusions: serde_json::Value = row.get("routing_exclusions");

    Ok(AttemptRecord {
        attempt_id: row.get("attempt_id"),
        obligation_id: row.get("obligation_id"),
        account_id: row.get("account_id"),
        predecessor_id: row.get("predecessor_id"),
        retry_sequence: row.get("retry_sequence"),
        status: AttemptStatus::parse(&status).ok_or_else(|| anyhow!("unknown attempt status {status}"))?,
        payment_track: PaymentTrack::parse(&track).ok_or_else(|| anyhow!("unknown payment track {track}"))?,
        method_directive: match directive {
            Some(d) => Some(MethodDirective::parse(&d).ok_or_else(|| anyhow!("unknown method directive {d}"))?),
            None => None,
        },
        scheduled_for: row.get("scheduled_for"),
        failure_code: row.get("failure_code"),
        routing_exclusions: serde_json::from_value::<Vec<RoutingExclusion>>(exclusions)?,
        created_at: row.get("created_at"),
    })
}

#[async_trait::async_trait]
impl AttemptStore for AttemptsRepo {
    async fn get(&self, attempt_id: Uuid) -> Result<Option<AttemptRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM collection_attempts WHERE attempt_id=$1"
        ))
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(from_row).transpose()
    }

    async fn find_successor(&self, predecessor_id: Uuid) -> Result<Option<AttemptRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM collection_attempts WHERE predecessor_id=$1"
        ))
        .bind(predecessor_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(from_row).transpose()
    }

    async fn create_attempt(&self, draft: AttemptDraft) -> Result<Option<AttemptRecord>> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO collection_attempts (
                attempt_id, obligation_id, account_id, predecessor_id, retry_sequence, status,
                payment_track, method_directive, scheduled_for, routing_exclusions
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            ON CONFLICT (predecessor_id) DO NOTHING
            RETURNING {ATTEMPT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(draft.obligation_id)
        .bind(draft.account_id)
        .bind(draft.predecessor_id)
        .bind(draft.retry_sequence)
        .bind(AttemptStatus::Scheduled.as_str())
        .bind(draft.payment_track.as_str())
        .bind(draft.method_directive.as_str())
        .bind(draft.scheduled_for)
        .bind(serde_json::to_value(&draft.routing_exclusions)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(from_row).transpose()
    }

    async fn list_for_obligation(&self, obligation_id: Uuid) -> Result<Vec<AttemptRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM collection_attempts WHERE obligation_id=$1 ORDER BY retry_sequence ASC"
        ))
        .bind(obligation_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }

    async fn record_alert(&self, attempt_id: Uuid) -> Result<bool> {
        let res = sqlx::query(
            "INSERT INTO collection_alerts (attempt_id) VALUES ($1) ON CONFLICT (attempt_id) DO NOTHING",
        )
        .bind(attempt_id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }
}
