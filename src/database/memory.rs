//! In-process stores for tests, demos and local runs without PostgreSQL.
//!
//! Both stores can be switched into a failing mode to exercise the error
//! paths of the scorer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AlertStore, TransactionStore};
use crate::error::StoreError;
use crate::models::{CreateFraudAlert, FraudAlert, Transaction};
use crate::utils::time::TimeWindow;

#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            failure: RwLock::new(None),
        }
    }

    pub async fn insert(&self, transaction: Transaction) {
        self.transactions.write().await.push(transaction);
    }

    /// Make every subsequent read fail with `error`.
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    async fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn in_window(&self, account_id: Uuid, window: TimeWindow, exclude_id: Uuid) -> Vec<Transaction> {
        self.transactions
            .read()
            .await
            .iter()
            .filter(|t| t.account_id == account_id && t.id != exclude_id && window.contains(t.timestamp))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn recent_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.check_failure().await?;
        Ok(self.in_window(account_id, TimeWindow { since, until }, exclude_id).await)
    }

    async fn count_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<i64, StoreError> {
        self.check_failure().await?;
        Ok(self.in_window(account_id, TimeWindow { since, until }, exclude_id).await.len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<FraudAlert>>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`.
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Snapshot of all stored alerts in insertion order.
    pub async fn alerts(&self) -> Vec<FraudAlert> {
        self.alerts.read().await.clone()
    }

    /// Insert a fully formed alert, e.g. one already resolved by an analyst.
    pub async fn insert(&self, alert: FraudAlert) {
        self.alerts.write().await.push(alert);
    }

    async fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.read().await.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn create_alert(&self, create_alert: CreateFraudAlert) -> Result<FraudAlert, StoreError> {
        self.check_failure().await?;

        let alert = FraudAlert::new(create_alert);
        self.alerts.write().await.push(alert.clone());
        Ok(alert)
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<FraudAlert>, StoreError> {
        self.check_failure().await?;
        Ok(self.alerts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_alerts(&self, skip: i64, limit: i64) -> Result<Vec<FraudAlert>, StoreError> {
        self.check_failure().await?;

        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .alerts
            .read()
            .await
            .iter()
            .rev()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }
}
