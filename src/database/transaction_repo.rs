use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::TransactionStore;
use crate::error::StoreError;
use crate::models::Transaction;

#[derive(Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn recent_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, account_id, amount, description, category, merchant, location, timestamp
            FROM transactions
            WHERE account_id = $1 AND timestamp >= $2 AND timestamp <= $3 AND id <> $4
            ORDER BY timestamp ASC
            "#,
        )
        .bind(account_id)
        .bind(since)
        .bind(until)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} transactions for account {}", transactions.len(), account_id);
        Ok(transactions)
    }

    async fn count_transactions(
        &self,
        account_id: Uuid,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        exclude_id: Uuid,
    ) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM transactions
            WHERE account_id = $1 AND timestamp >= $2 AND timestamp <= $3 AND id <> $4
            "#,
        )
        .bind(account_id)
        .bind(since)
        .bind(until)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
