use crate::domain::decision::{Decision, RoutingExclusion};
use crate::domain::failure::TimeBucket;
use serde::{Deserialize, Serialize};

/// Route future attempts away from a named processor once retries pile up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessorExclusionRule {
    pub bucket: TimeBucket,
    pub codes: Vec<i32>,
    /// Triggers when the retry count is strictly greater than this.
    pub min_retries: i32,
    pub processor: String,
}

/// Stop rescheduling once an aged obligation has been retried too often.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExhaustionBackoffRule {
    pub bucket: TimeBucket,
    pub codes: Vec<i32>,
    /// Triggers when the retry count is strictly greater than this.
    pub min_retries: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideRules {
    pub processor_exclusion: ProcessorExclusionRule,
    pub exhaustion_backoff: ExhaustionBackoffRule,
}

impl Default for OverrideRules {
    fn default() -> Self {
        Self {
            processor_exclusion: ProcessorExclusionRule {
                bucket: TimeBucket::UpTo60Days,
                codes: vec![904, 441, 601, 701, 706],
                min_retries: 8,
                processor: "stripe".to_string(),
            },
            exhaustion_backoff: ExhaustionBackoffRule {
                bucket: TimeBucket::UpTo180Days,
                codes: vec![441, 701, 706],
                min_retries: 12,
            },
        }
    }
}

impl ProcessorExclusionRule {
    fn triggers(&self, code: i32, bucket: TimeBucket, retry_count: i32) -> bool {
        bucket == self.bucket && self.codes.contains(&code) && retry_count > self.min_retries
    }
}

impl ExhaustionBackoffRule {
    fn triggers(&self, code: i32, bucket: TimeBucket, retry_count: i32) -> bool {
        bucket == self.bucket && self.codes.contains(&code) && retry_count > self.min_retries
    }
}

impl OverrideRules {
    /// Both rules are checked against the base decision; exhaustion replaces the
    /// whole decision when it fires.
    pub fn apply(&self, base: Decision, code: i32, bucket: TimeBucket, retry_count: i32) -> Decision {
        if self.exhaustion_backoff.triggers(code, bucket, retry_count) {
            tracing::debug!(code, %bucket, retry_count, "exhaustion override forces backoff");
            return Decision::backoff();
        }

        let mut decision = base;
        if self.processor_exclusion.triggers(code, bucket, retry_count) {
            let processor = self.processor_exclusion.processor.clone();
            tracing::debug!(code, %bucket, retry_count, processor = %processor, "excluding processor");
            if !decision.excludes_processor(&processor) {
                decision
                    .routing_exclusions
                    .push(RoutingExclusion::Processor { name: processor });
            }
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{MethodDirective, RetryAction, RetryRule};

    fn friday_bank_card() -> Decision {
        Decision::from_rule(RetryRule::new(
            RetryAction::ScheduleFriday,
            MethodDirective::TryBankThenCard,
        ))
    }

    #[test]
    fn exclusion_only_in_its_bucket() {
        let rules = OverrideRules::default();
        let out = rules.apply(friday_bank_card(), 701, TimeBucket::UpTo30Days, 20);
        assert!(out.routing_exclusions.is_empty());
    }

    #[test]
    fn exclusion_ignores_codes_outside_the_list() {
        let rules = OverrideRules::default();
        let out = rules.apply(friday_bank_card(), 903, TimeBucket::UpTo60Days, 20);
        assert!(out.routing_exclusions.is_empty());
    }

    #[test]
    fn custom_processor_name_is_used() {
        let mut rules = OverrideRules::default();
        rules.processor_exclusion.processor = "adyen".to_string();
        let out = rules.apply(friday_bank_card(), 441, TimeBucket::UpTo60Days, 9);
        assert!(out.excludes_processor("adyen"));
        assert!(!out.excludes_processor("stripe"));
    }

    #[test]
    fn exhaustion_clears_everything() {
        let rules = OverrideRules::default();
        let mut base = friday_bank_card();
        base.routing_exclusions.push(RoutingExclusion::Processor {
            name: "stripe".to_string(),
        });
        let out = rules.apply(base, 706, TimeBucket::UpTo180Days, 13);
        assert_eq!(out, Decision::backoff());
    }
}
