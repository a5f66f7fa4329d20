use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::AlertStore;
use crate::error::StoreError;
use crate::models::{CreateFraudAlert, FraudAlert, FraudAlertStatus};

const ALERT_COLUMNS: &str =
    "id, transaction_id, risk_score, reason, status, analyst_id, created_at, resolved_at";

#[derive(Clone)]
pub struct PgAlertStore {
    pool: PgPool,
}

impl PgAlertStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_alert_row(row: &PgRow) -> Result<FraudAlert, StoreError> {
    let status: String = row.try_get("status")?;
    let status = status.parse::<FraudAlertStatus>().map_err(StoreError::Query)?;

    Ok(FraudAlert {
        id: row.try_get("id")?,
        transaction_id: row.try_get("transaction_id")?,
        risk_score: row.try_get("risk_score")?,
        reason: row.try_get("reason")?,
        status,
        analyst_id: row.try_get("analyst_id")?,
        created_at: row.try_get("created_at")?,
        resolved_at: row.try_get("resolved_at")?,
    })
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn create_alert(&self, create_alert: CreateFraudAlert) -> Result<FraudAlert, StoreError> {
        let alert = FraudAlert::new(create_alert);

        let mut tx = self.pool.begin().await?;
        let query = format!(
            r#"
            INSERT INTO fraud_alerts (id, transaction_id, risk_score, reason, status, analyst_id, created_at, resolved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            ALERT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(alert.id)
            .bind(alert.transaction_id)
            .bind(alert.risk_score)
            .bind(&alert.reason)
            .bind(alert.status.as_str())
            .bind(alert.analyst_id)
            .bind(alert.created_at)
            .bind(alert.resolved_at)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        let stored = map_alert_row(&row)?;
        info!("Stored fraud alert {} for transaction {}", stored.id, stored.transaction_id);
        Ok(stored)
    }

    async fn get_alert(&self, id: Uuid) -> Result<Option<FraudAlert>, StoreError> {
        let query = format!("SELECT {} FROM fraud_alerts WHERE id = $1", ALERT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_alert_row).transpose()
    }

    async fn list_alerts(&self, skip: i64, limit: i64) -> Result<Vec<FraudAlert>, StoreError> {
        let query = format!(
            "SELECT {} FROM fraud_alerts ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            ALERT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_alert_row).collect()
    }
}
