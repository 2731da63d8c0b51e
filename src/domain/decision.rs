use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetryAction {
    /// Retry on the reference date.
    Instant,
    /// Earliest of next Friday or the balance-due date.
    ScheduleFriday,
    /// Earliest of the end-of-month Friday or the balance-due date.
    ScheduleFridayEom,
    AlertAndBackoff,
    Backoff,
    NotPossible,
}

impl RetryAction {
    pub fn creates_successor(self) -> bool {
        matches!(
            self,
            RetryAction::Instant | RetryAction::ScheduleFriday | RetryAction::ScheduleFridayEom
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RetryAction::Instant => "INSTANT",
            RetryAction::ScheduleFriday => "SCHEDULE_FRIDAY",
            RetryAction::ScheduleFridayEom => "SCHEDULE_FRIDAY_EOM",
            RetryAction::AlertAndBackoff => "ALERT_AND_BACKOFF",
            RetryAction::Backoff => "BACKOFF",
            RetryAction::NotPossible => "NOT_POSSIBLE",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodDirective {
    UseCard,
    TryBankThenCard,
    NoChange,
}

impl MethodDirective {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodDirective::UseCard => "USE_CARD",
            MethodDirective::TryBankThenCard => "TRY_BANK_THEN_CARD",
            MethodDirective::NoChange => "NO_CHANGE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USE_CARD" => Some(MethodDirective::UseCard),
            "TRY_BANK_THEN_CARD" => Some(MethodDirective::TryBankThenCard),
            "NO_CHANGE" => Some(MethodDirective::NoChange),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryRule {
    pub action: RetryAction,
    pub method: MethodDirective,
}

impl RetryRule {
    pub const fn new(action: RetryAction, method: MethodDirective) -> Self {
        Self { action, method }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingExclusion {
    Processor { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decision {
    pub action: RetryAction,
    pub method: MethodDirective,
    pub reschedule_date: Option<NaiveDate>,
    pub routing_exclusions: Vec<RoutingExclusion>,
}

impl Decision {
    pub fn from_rule(rule: RetryRule) -> Self {
        Self {
            action: rule.action,
            method: rule.method,
            reschedule_date: None,
            routing_exclusions: Vec::new(),
        }
    }

    pub fn backoff() -> Self {
        Self::from_rule(RetryRule::new(RetryAction::Backoff, MethodDirective::NoChange))
    }

    pub fn excludes_processor(&self, name: &str) -> bool {
        self.routing_exclusions
            .iter()
            .any(|e| matches!(e, RoutingExclusion::Processor { name: n } if n == name))
    }
}
