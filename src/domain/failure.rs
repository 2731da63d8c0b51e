use crate::domain::attempt::PaymentTrack;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Age classification of an overdue obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeBucket {
    #[serde(rename = "0-30D")]
    UpTo30Days,
    #[serde(rename = "31-60D")]
    UpTo60Days,
    #[serde(rename = "61-180D")]
    UpTo180Days,
    #[serde(rename = "181D+")]
    Over180Days,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::UpTo30Days,
        TimeBucket::UpTo60Days,
        TimeBucket::UpTo180Days,
        TimeBucket::Over180Days,
    ];

    /// Slot of this bucket in a rule row.
    pub fn index(self) -> usize {
        match self {
            TimeBucket::UpTo30Days => 0,
            TimeBucket::UpTo60Days => 1,
            TimeBucket::UpTo180Days => 2,
            TimeBucket::Over180Days => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::UpTo30Days => "0-30D",
            TimeBucket::UpTo60Days => "31-60D",
            TimeBucket::UpTo180Days => "61-180D",
            TimeBucket::Over180Days => "181D+",
        }
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the decision engine needs about one failed attempt.
#[derive(Debug, Clone)]
pub struct FailureContext {
    pub attempt_id: Uuid,
    pub obligation_id: Uuid,
    pub account_id: Uuid,
    pub failure_code: i32,
    pub days_overdue: i64,
    pub retry_count: i32,
    pub payment_track: PaymentTrack,
    pub reference_time: DateTime<Utc>,
}

