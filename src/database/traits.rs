// Narrow storage interfaces consumed by the fraud services
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{CreateFraudAlert, FraudAlert, Transaction};

/// Read access to posted account transactions.
///
/// Both methods cover the closed window `[since, until]` and skip the
/// transaction `exclude_id`, normally the one being scored.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Transactions of `account_id` inside the window. Order is not significant.
    async fn recent_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Number of transactions of `account_id` inside the window.
    async fn count_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<i64, StoreError>;
}

/// Persistence of fraud alerts.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Atomically persist a new OPEN alert. Either the alert exists with all
    /// fields set afterwards, or the call fails.
    async fn create_alert(&self, alert: CreateFraudAlert) -> Result<FraudAlert, StoreError>;

    async fn get_alert(&self, id: Uuid) -> Result<Option<FraudAlert>, StoreError>;

    /// Alerts ordered newest first.
    async fn list_alerts(&self, skip: i64, limit: i64) -> Result<Vec<FraudAlert>, StoreError>;
}
