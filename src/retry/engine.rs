use crate::domain::decision::{Decision, RetryAction};
use crate::domain::failure::{FailureContext, TimeBucket};
use crate::retry::bucket::classify;
use crate::retry::error::RetryError;
use crate::retry::overrides::OverrideRules;
use crate::retry::rule_table::lookup;
use crate::retry::schedule::reschedule_date;
use chrono::NaiveDate;

/// Pure decision pipeline: classify, look up the rule, apply overrides.
/// Dating the decision is a separate step so the balance-due date is only
/// fetched for actions that reschedule.
#[derive(Debug, Clone, Default)]
pub struct RetryEngine {
    pub overrides: OverrideRules,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDecision {
    pub bucket: TimeBucket,
    pub decision: Decision,
}

impl RetryEngine {
    pub fn new(overrides: OverrideRules) -> Self {
        Self { overrides }
    }

    pub fn resolve(&self, ctx: &FailureContext) -> Result<ResolvedDecision, RetryError> {
        let bucket = classify(ctx.days_overdue)?;
        let rule = lookup(ctx.failure_code, bucket)?;
        tracing::debug!(
            attempt_id = %ctx.attempt_id,
            code = ctx.failure_code,
            %bucket,
            action = rule.action.as_str(),
            method = rule.method.as_str(),
            "base retry rule resolved"
        );

        if rule.action == RetryAction::NotPossible {
            return Err(RetryError::RetryNotPossible {
                code: ctx.failure_code,
                bucket,
            });
        }

        let decision = self.overrides.apply(
            Decision::from_rule(rule),
            ctx.failure_code,
            bucket,
            ctx.retry_count,
        );
        Ok(ResolvedDecision { bucket, decision })
    }
}

/// Attach the concrete reschedule date for the decision's action.
pub fn finalize(mut decision: Decision, today: NaiveDate, balance_due_date: Option<NaiveDate>) -> Decision {
    decision.reschedule_date = reschedule_date(decision.action, today, balance_due_date);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attempt::PaymentTrack;
    use crate::domain::decision::MethodDirective;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn ctx(code: i32, days_overdue: i64, retry_count: i32) -> FailureContext {
        FailureContext {
            attempt_id: Uuid::new_v4(),
            obligation_id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            failure_code: code,
            days_overdue,
            retry_count,
            payment_track: PaymentTrack::Card,
            reference_time: Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn not_possible_surfaces_as_error() {
        let engine = RetryEngine::default();
        let err = engine.resolve(&ctx(445, 10, 0)).unwrap_err();
        assert!(matches!(err, RetryError::RetryNotPossible { code: 445, .. }));
    }

    #[test]
    fn negative_age_propagates() {
        let engine = RetryEngine::default();
        assert!(matches!(
            engine.resolve(&ctx(904, -3, 0)),
            Err(RetryError::InvalidDaysOverdue(-3))
        ));
    }

    #[test]
    fn finalize_dates_friday_actions() {
        let engine = RetryEngine::default();
        let resolved = engine.resolve(&ctx(441, 40, 1)).unwrap();
        assert_eq!(resolved.bucket, TimeBucket::UpTo60Days);
        assert_eq!(resolved.decision.method, MethodDirective::TryBankThenCard);

        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let dated = finalize(resolved.decision, today, None);
        assert_eq!(dated.reschedule_date, NaiveDate::from_ymd_opt(2024, 3, 8));
    }
}
