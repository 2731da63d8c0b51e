use crate::service::collaborators::{AccountSource, ObligationSource};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Read-only view of billing cycles and account deadlines.
#[derive(Clone)]
pub struct BillingRepo {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl ObligationSource for BillingRepo {
    async fn days_overdue(&self, obligation_id: Uuid, as_of: NaiveDate) -> Result<i64> {
        let row = sqlx::query("SELECT due_date FROM billing_cycles WHERE billing_cycle_id=$1")
            .bind(obligation_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| anyhow!("billing cycle {obligation_id} not found"))?;

        let due_date: NaiveDate = row.get("due_date");
        // Negative when the cycle is not yet due; the classifier rejects it.
        Ok((as_of - due_date).num_days())
    }
}

#[async_trait::async_trait]
impl AccountSource for BillingRepo {
    async fn balance_due_date(&self, account_id: Uuid) -> Result<Option<NaiveDate>> {
        let row = sqlx::query("SELECT balance_due_date FROM accounts WHERE account_id=$1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| anyhow!("account {account_id} not found"))?;

        Ok(row.get("balance_due_date"))
    }
}
