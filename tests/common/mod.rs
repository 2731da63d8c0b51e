#![allow(dead_code)]

use collections_retry::domain::decision::{MethodDirective, RetryAction};

pub type Expected = Option<(RetryAction, MethodDirective)>;

pub const INSTANT: Expected = Some((RetryAction::Instant, MethodDirective::UseCard));
pub const FRIDAY: Expected = Some((RetryAction::ScheduleFriday, MethodDirective::TryBankThenCard));
pub const FRIDAY_EOM: Expected = Some((RetryAction::ScheduleFridayEom, MethodDirective::TryBankThenCard));
pub const ALERT: Expected = Some((RetryAction::AlertAndBackoff, MethodDirective::NoChange));
pub const BACKOFF: Expected = Some((RetryAction::Backoff, MethodDirective::NoChange));
pub const NOT_POSSIBLE: Expected = None;

pub fn policy_table() -> Vec<(i32, [Expected; 4])> {
    let mut rows = vec![
        (904, [INSTANT, INSTANT, INSTANT, BACKOFF]),
        (903, [ALERT, ALERT, BACKOFF, BACKOFF]),
        (440, [ALERT, ALERT, BACKOFF, BACKOFF]),
        (441, [FRIDAY, FRIDAY, FRIDAY_EOM, BACKOFF]),
        (444, [NOT_POSSIBLE; 4]),
        (445, [NOT_POSSIBLE; 4]),
        (601, [FRIDAY_EOM, FRIDAY_EOM, BACKOFF, BACKOFF]),
        (777, [ALERT, ALERT, BACKOFF, BACKOFF]),
        (701, [FRIDAY, FRIDAY, FRIDAY_EOM, BACKOFF]),
        (706, [FRIDAY, FRIDAY, FRIDAY_EOM, BACKOFF]),
    ];
    for code in 603..=607 {
        rows.push((code, [ALERT, ALERT, BACKOFF, BACKOFF]));
    }
    for code in [442, 443, 613, 615, 616, 640, 710] {
        rows.push((code, [NOT_POSSIBLE; 4]));
    }
    rows
}

/// Representative age for each bucket, in bucket order.
pub const AGES: [i64; 4] = [12, 45, 120, 400];
