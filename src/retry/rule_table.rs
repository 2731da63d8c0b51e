//! Fail-code policy as data.
//!
//! Each row covers a group of failure codes and carries exactly one rule per
//! [`TimeBucket`], so every known code is defined in every bucket. Amending a
//! policy means editing a row here.

use crate::domain::decision::{MethodDirective, RetryAction, RetryRule};
use crate::domain::failure::TimeBucket;
use crate::retry::error::RetryError;

#[derive(Debug)]
pub struct RuleRow {
    pub codes: &'static [i32],
    /// Indexed by [`TimeBucket::index`].
    pub rules: [RetryRule; 4],
}

const INSTANT_CARD: RetryRule = RetryRule::new(RetryAction::Instant, MethodDirective::UseCard);
const FRIDAY_BANK_CARD: RetryRule =
    RetryRule::new(RetryAction::ScheduleFriday, MethodDirective::TryBankThenCard);
const FRIDAY_EOM_BANK_CARD: RetryRule =
    RetryRule::new(RetryAction::ScheduleFridayEom, MethodDirective::TryBankThenCard);
const ALERT_BACKOFF: RetryRule =
    RetryRule::new(RetryAction::AlertAndBackoff, MethodDirective::NoChange);
const BACKOFF: RetryRule = RetryRule::new(RetryAction::Backoff, MethodDirective::NoChange);
const NOT_POSSIBLE: RetryRule = RetryRule::new(RetryAction::NotPossible, MethodDirective::NoChange);

pub static RETRY_RULES: &[RuleRow] = &[
    RuleRow {
        codes: &[904],
        rules: [INSTANT_CARD, INSTANT_CARD, INSTANT_CARD, BACKOFF],
    },
    RuleRow {
        codes: &[903, 440],
        rules: [ALERT_BACKOFF, ALERT_BACKOFF, BACKOFF, BACKOFF],
    },
    RuleRow {
        codes: &[441],
        rules: [FRIDAY_BANK_CARD, FRIDAY_BANK_CARD, FRIDAY_EOM_BANK_CARD, BACKOFF],
    },
    RuleRow {
        codes: &[444, 445],
        rules: [NOT_POSSIBLE; 4],
    },
    RuleRow {
        codes: &[601],
        rules: [FRIDAY_EOM_BANK_CARD, FRIDAY_EOM_BANK_CARD, BACKOFF, BACKOFF],
    },
    RuleRow {
        codes: &[603, 604, 605, 606, 607, 777],
        rules: [ALERT_BACKOFF, ALERT_BACKOFF, BACKOFF, BACKOFF],
    },
    RuleRow {
        codes: &[701, 706],
        rules: [FRIDAY_BANK_CARD, FRIDAY_BANK_CARD, FRIDAY_EOM_BANK_CARD, BACKOFF],
    },
    RuleRow {
        codes: &[442, 443, 613, 615, 616, 640, 710],
        rules: [NOT_POSSIBLE; 4],
    },
];

pub fn lookup(code: i32, bucket: TimeBucket) -> Result<RetryRule, RetryError> {
    RETRY_RULES
        .iter()
        .find(|row| row.codes.contains(&code))
        .map(|row| row.rules[bucket.index()])
        .ok_or(RetryError::UnknownFailureCode(code))
}

/// Every failure code with a rule, in table order.
pub fn known_codes() -> impl Iterator<Item = i32> {
    RETRY_RULES.iter().flat_map(|row| row.codes.iter().copied())
}
