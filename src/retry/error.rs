use crate::domain::failure::TimeBucket;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RetryError {
    #[error("failure code {0} has no retry rule")]
    UnknownFailureCode(i32),

    /// Expected business outcome: the obligation needs manual review.
    #[error("retry not possible for failure code {code} in bucket {bucket}")]
    RetryNotPossible { code: i32, bucket: TimeBucket },

    #[error("days overdue must be non-negative, got {0}")]
    InvalidDaysOverdue(i64),

    #[error("attempt {attempt_id} failed with code {stored}, not {received}")]
    FailureCodeMismatch {
        attempt_id: Uuid,
        stored: i32,
        received: i32,
    },

    #[error("attempt {0} not found")]
    AttemptNotFound(Uuid),

    /// A collaborator read failed. Recomputing the decision is safe.
    #[error("could not load {what}: {source}")]
    MissingContext {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to persist successor attempt: {0}")]
    PersistenceFailure(#[source] anyhow::Error),
}

impl RetryError {
    pub fn code(&self) -> &'static str {
        match self {
            RetryError::UnknownFailureCode(_) => "UNKNOWN_FAILURE_CODE",
            RetryError::RetryNotPossible { .. } => "RETRY_NOT_POSSIBLE",
            RetryError::InvalidDaysOverdue(_) => "INVALID_DAYS_OVERDUE",
            RetryError::FailureCodeMismatch { .. } => "FAILURE_CODE_MISMATCH",
            RetryError::AttemptNotFound(_) => "ATTEMPT_NOT_FOUND",
            RetryError::MissingContext { .. } => "MISSING_CONTEXT",
            RetryError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub(crate) fn missing(what: &'static str) -> impl FnOnce(anyhow::Error) -> RetryError {
        move |source| RetryError::MissingContext { what, source }
    }
}
