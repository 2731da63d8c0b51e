use crate::domain::decision::{MethodDirective, RoutingExclusion};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentTrack {
    Card,
    Bank,
}

impl PaymentTrack {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentTrack::Card => "CARD",
            PaymentTrack::Bank => "BANK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CARD" => Some(PaymentTrack::Card),
            "BANK" => Some(PaymentTrack::Bank),
            _ => None,
        }
    }

    /// Track the successor should start on under `directive`.
    pub fn for_directive(self, directive: MethodDirective) -> Self {
        match directive {
            MethodDirective::UseCard => PaymentTrack::Card,
            MethodDirective::TryBankThenCard => PaymentTrack::Bank,
            MethodDirective::NoChange => self,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    Scheduled,
    Processing,
    Succeeded,
    Failed,
}

impl AttemptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptStatus::Scheduled => "SCHEDULED",
            AttemptStatus::Processing => "PROCESSING",
            AttemptStatus::Succeeded => "SUCCEEDED",
            AttemptStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SCHEDULED" => Some(AttemptStatus::Scheduled),
            "PROCESSING" => Some(AttemptStatus::Processing),
            "SUCCEEDED" => Some(AttemptStatus::Succeeded),
            "FAILED" => Some(AttemptStatus::Failed),
            _ => None,
        }
    }
}

/// One collection attempt against an obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttemptRecord {
    pub attempt_id: Uuid,
    pub obligation_id: Uuid,
    pub account_id: Uuid,
    pub predecessor_id: Option<Uuid>,
    pub retry_sequence: i32,
    pub status: AttemptStatus,
    pub payment_track: PaymentTrack,
    pub method_directive: Option<MethodDirective>,
    pub scheduled_for: NaiveDate,
    pub failure_code: Option<i32>,
    pub routing_exclusions: Vec<RoutingExclusion>,
    pub created_at: DateTime<Utc>,
}

/// A successor attempt that has not been written yet. Always persisted as `SCHEDULED`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptDraft {
    pub obligation_id: Uuid,
    pub account_id: Uuid,
    pub predecessor_id: Uuid,
    pub retry_sequence: i32,
    pub payment_track: PaymentTrack,
    pub method_directive: MethodDirective,
    pub scheduled_for: NaiveDate,
    pub routing_exclusions: Vec<RoutingExclusion>,
}

impl AttemptDraft {
    pub fn successor_of(
        predecessor: &AttemptRecord,
        directive: MethodDirective,
        scheduled_for: NaiveDate,
        routing_exclusions: Vec<RoutingExclusion>,
    ) -> Self {
        Self {
            obligation_id: predecessor.obligation_id,
            account_id: predecessor.account_id,
            predecessor_id: predecessor.attempt_id,
            retry_sequence: predecessor.retry_sequence + 1,
            payment_track: predecessor.payment_track.for_directive(directive),
            method_directive: directive,
            scheduled_for,
            routing_exclusions,
        }
    }
}
