use crate::domain::attempt::{AttemptDraft, AttemptRecord, AttemptStatus};
use crate::domain::decision::{Decision, RetryAction};
use crate::domain::failure::FailureContext;
use crate::retry::engine::{finalize, ResolvedDecision, RetryEngine};
use crate::retry::error::RetryError;
use crate::service::collaborators::{
    AccountSource, AlertSink, AttemptStore, ObligationSource, RetryAlert,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetryOutcome {
    Scheduled {
        successor: AttemptRecord,
        decision: Decision,
    },
    /// The failed attempt is returned unchanged.
    BackedOff {
        attempt: AttemptRecord,
        decision: Decision,
        alerted: bool,
    },
    /// Another resolution got there first; carries the successor if one exists,
    /// otherwise the attempt as currently stored.
    AlreadyHandled { attempt: AttemptRecord },
}

impl RetryOutcome {
    pub fn record(&self) -> &AttemptRecord {
        match self {
            RetryOutcome::Scheduled { successor, .. } => successor,
            RetryOutcome::BackedOff { attempt, .. } => attempt,
            RetryOutcome::AlreadyHandled { attempt } => attempt,
        }
    }

    pub fn into_record(self) -> AttemptRecord {
        match self {
            RetryOutcome::Scheduled { successor, .. } => successor,
            RetryOutcome::BackedOff { attempt, .. } => attempt,
            RetryOutcome::AlreadyHandled { attempt } => attempt,
        }
    }
}

#[derive(Clone)]
pub struct RetryOrchestrator {
    pub engine: RetryEngine,
    pub attempts: Arc<dyn AttemptStore>,
    pub obligations: Arc<dyn ObligationSource>,
    pub accounts: Arc<dyn AccountSource>,
    pub alerts: Arc<dyn AlertSink>,
}

impl RetryOrchestrator {
    pub async fn resolve_retry(
        &self,
        failed_attempt: &AttemptRecord,
        failure_code: i32,
        reference_time: DateTime<Utc>,
    ) -> Result<RetryOutcome, RetryError> {
        let attempt_id = failed_attempt.attempt_id;

        let current = self
            .attempts
            .get(attempt_id)
            .await
            .map_err(RetryError::missing("attempt"))?
            .ok_or(RetryError::AttemptNotFound(attempt_id))?;
        if current.status != AttemptStatus::Failed {
            tracing::warn!(%attempt_id, status = current.status.as_str(), "attempt not in FAILED state, skipping");
            return Ok(RetryOutcome::AlreadyHandled { attempt: current });
        }
        if let Some(stored) = current.failure_code {
            if stored != failure_code {
                tracing::warn!(%attempt_id, stored, received = failure_code, "failure code does not match stored attempt");
                return Err(RetryError::FailureCodeMismatch {
                    attempt_id,
                    stored,
                    received: failure_code,
                });
            }
        }
        if let Some(successor) = self.existing_successor(&current).await? {
            return Ok(RetryOutcome::AlreadyHandled { attempt: successor });
        }

        let today = reference_time.date_naive();
        let days_overdue = self
            .obligations
            .days_overdue(current.obligation_id, today)
            .await
            .map_err(RetryError::missing("days overdue"))?;

        let ctx = FailureContext {
            attempt_id,
            obligation_id: current.obligation_id,
            account_id: current.account_id,
            failure_code,
            days_overdue,
            retry_count: current.retry_sequence,
            payment_track: current.payment_track,
            reference_time,
        };

        let ResolvedDecision { bucket, decision } = match self.engine.resolve(&ctx) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::info!(%attempt_id, code = failure_code, error = %err, "retry not resolved");
                return Err(err);
            }
        };

        if decision.action == RetryAction::NotPossible {
            return Err(RetryError::RetryNotPossible {
                code: failure_code,
                bucket,
            });
        }
        if decision.action.creates_successor() {
            return self.schedule_successor(current, decision, today).await;
        }

        let alerted = if decision.action == RetryAction::AlertAndBackoff {
            let alert = RetryAlert {
                attempt_id,
                obligation_id: ctx.obligation_id,
                account_id: ctx.account_id,
                failure_code,
                bucket,
                retry_count: ctx.retry_count,
                raised_at: reference_time,
            };
            self.alert_once(&alert).await
        } else {
            false
        };
        tracing::info!(%attempt_id, code = failure_code, %bucket, action = decision.action.as_str(), alerted, "backing off");
        Ok(RetryOutcome::BackedOff {
            attempt: current,
            decision,
            alerted,
        })
    }

    /// Sends the alert only the first time this attempt backs off with an alert.
    /// A failed claim still delivers; a failed delivery is logged and dropped.
    async fn alert_once(&self, alert: &RetryAlert) -> bool {
        let attempt_id = alert.attempt_id;
        match self.attempts.record_alert(attempt_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(%attempt_id, "retry alert already sent, skipping");
                return false;
            }
            Err(e) => tracing::warn!(%attempt_id, error = %e, "could not record retry alert, sending anyway"),
        }

        match self.alerts.send_alert(alert).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%attempt_id, error = %e, "retry alert delivery failed");
                false
            }
        }
    }

    async fn schedule_successor(
        &self,
        current: AttemptRecord,
        decision: Decision,
        today: chrono::NaiveDate,
    ) -> Result<RetryOutcome, RetryError> {
        let balance_due_date = if decision.action == RetryAction::Instant {
            None
        } else {
            self.accounts
                .balance_due_date(current.account_id)
                .await
                .map_err(RetryError::missing("balance due date"))?
        };

        let decision = finalize(decision, today, balance_due_date);
        // Only rescheduling actions reach here, and they always carry a date.
        let scheduled_for = decision.reschedule_date.unwrap_or(today);

        let draft = AttemptDraft::successor_of(
            &current,
            decision.method,
            scheduled_for,
            decision.routing_exclusions.clone(),
        );

        match self
            .attempts
            .create_attempt(draft)
            .await
            .map_err(RetryError::PersistenceFailure)?
        {
            Some(successor) => {
                tracing::info!(
                    attempt_id = %current.attempt_id,
                    successor_id = %successor.attempt_id,
                    action = decision.action.as_str(),
                    scheduled_for = %successor.scheduled_for,
                    retry_sequence = successor.retry_sequence,
                    "successor attempt scheduled"
                );
                Ok(RetryOutcome::Scheduled {
                    successor,
                    decision,
                })
            }
            None => {
                tracing::warn!(attempt_id = %current.attempt_id, "duplicate successor suppressed");
                let existing = self
                    .existing_successor(&current)
                    .await?
                    .unwrap_or(current);
                Ok(RetryOutcome::AlreadyHandled { attempt: existing })
            }
        }
    }

    async fn existing_successor(
        &self,
        attempt: &AttemptRecord,
    ) -> Result<Option<AttemptRecord>, RetryError> {
        self.attempts
            .find_successor(attempt.attempt_id)
            .await
            .map_err(RetryError::missing("successor attempt"))
    }
}
