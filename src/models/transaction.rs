use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::error::FraudError;

/// Largest magnitude accepted for an amount, matching the NUMERIC(12,2) column.
const MAX_ABS_AMOUNT: i64 = 10_000_000_000;

/// A posted account transaction. Amounts are signed: debits negative,
/// credits positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub account_id: Uuid,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub merchant: Option<String>,
    pub location: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Amounts arrive either as decimal strings or as JSON numbers. Numbers are
/// parsed from their shortest round-trip text, so `10.10` stays `10.10`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Text(text) => BigDecimal::from_str(&text).map_err(de::Error::custom),
        RawAmount::Integer(value) => Ok(BigDecimal::from(value)),
        RawAmount::Float(value) => BigDecimal::from_str(&value.to_string()).map_err(de::Error::custom),
    }
}

impl Transaction {
    pub fn new(create_transaction: CreateTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: create_transaction.account_id,
            amount: create_transaction.amount,
            description: create_transaction.description,
            category: create_transaction.category,
            merchant: create_transaction.merchant,
            location: create_transaction.location,
            timestamp: create_transaction.timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Reject transactions whose amount or timestamp could not have come out
    /// of the ledger: more than two fractional digits, an amount outside the
    /// storage range, or a timestamp beyond the allowed clock skew.
    pub fn validate(&self, now: DateTime<Utc>, max_future_skew: Duration) -> Result<(), FraudError> {
        if self.amount.with_scale(2) != self.amount {
            return Err(FraudError::invalid(format!(
                "amount {} has more than two fractional digits",
                self.amount
            )));
        }

        if self.amount.abs() >= BigDecimal::from(MAX_ABS_AMOUNT) {
            return Err(FraudError::invalid(format!(
                "amount {} is outside the supported range",
                self.amount
            )));
        }

        if self.timestamp > now + max_future_skew {
            return Err(FraudError::invalid(format!(
                "timestamp {} is in the future",
                self.timestamp.to_rfc3339()
            )));
        }

        Ok(())
    }
}

/// Read-only view of an account's transactions inside one lookback window.
#[derive(Debug, Clone, Default)]
pub struct TransactionHistory {
    transactions: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Arithmetic mean of the signed amounts, `None` for an empty window.
    pub fn mean_amount(&self) -> Option<BigDecimal> {
        if self.transactions.is_empty() {
            return None;
        }

        let sum: BigDecimal = self.transactions.iter().map(|t| t.amount.clone()).sum();
        Some(sum / BigDecimal::from(self.transactions.len() as i64))
    }
}

impl From<Vec<Transaction>> for TransactionHistory {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self::new(transactions)
    }
}
