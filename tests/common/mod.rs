#![allow(dead_code)]

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use fraud_risk_monitor::{
    config::RiskScorerConfig,
    database::{InMemoryAlertStore, InMemoryTransactionStore},
    models::{CreateTransaction, Transaction},
    services::RiskScorer,
};

pub fn at_hour(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, hour, 30, 0).unwrap()
}

pub struct TransactionBuilder {
    create: CreateTransaction,
}

impl TransactionBuilder {
    pub fn new(account_id: Uuid, amount: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            create: CreateTransaction {
                account_id,
                amount: BigDecimal::from_str(amount).unwrap(),
                description: None,
                category: None,
                merchant: None,
                location: None,
                timestamp: Some(timestamp),
            },
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.create.location = Some(location.to_string());
        self
    }

    pub fn merchant(mut self, merchant: &str) -> Self {
        self.create.merchant = Some(merchant.to_string());
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(self.create)
    }
}

/// `count` past transactions of `amount` spread over the days before `anchor`.
pub fn baseline(account_id: Uuid, amount: &str, count: i64, anchor: DateTime<Utc>) -> Vec<Transaction> {
    (1..=count)
        .map(|day| TransactionBuilder::new(account_id, amount, anchor - Duration::days(day)).build())
        .collect()
}

pub struct Harness {
    pub transactions: Arc<InMemoryTransactionStore>,
    pub alerts: Arc<InMemoryAlertStore>,
    pub scorer: RiskScorer,
}

impl Harness {
    pub fn new(history: Vec<Transaction>) -> Self {
        Self::with_config(history, RiskScorerConfig::default())
    }

    pub fn with_config(history: Vec<Transaction>, config: RiskScorerConfig) -> Self {
        let transactions = Arc::new(InMemoryTransactionStore::with_transactions(history));
        let alerts = Arc::new(InMemoryAlertStore::new());
        let scorer = RiskScorer::new(config, transactions.clone(), alerts.clone()).unwrap();

        Self { transactions, alerts, scorer }
    }
}
