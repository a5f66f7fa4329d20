use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::{FactorWeights, RiskScorerConfig};
use crate::models::Transaction;
use crate::utils::time::utc_hour;

/// The independent signals that add to a transaction's risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    AmountAnomaly,
    OffHours,
    ForeignLocation,
    BurstFrequency,
    HighRiskMerchant,
}

impl RiskFactor {
    /// Evaluation order. Labels are reported in this order.
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::AmountAnomaly,
        RiskFactor::OffHours,
        RiskFactor::ForeignLocation,
        RiskFactor::BurstFrequency,
        RiskFactor::HighRiskMerchant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::AmountAnomaly => "Unusually high transaction amount",
            RiskFactor::OffHours => "Transaction outside normal hours",
            RiskFactor::ForeignLocation => "Foreign location transaction",
            RiskFactor::BurstFrequency => "High transaction frequency",
            RiskFactor::HighRiskMerchant => "High-risk merchant category",
        }
    }

    pub fn weight(&self, weights: &FactorWeights) -> f64 {
        match self {
            RiskFactor::AmountAnomaly => weights.amount_anomaly,
            RiskFactor::OffHours => weights.off_hours,
            RiskFactor::ForeignLocation => weights.foreign_location,
            RiskFactor::BurstFrequency => weights.burst_frequency,
            RiskFactor::HighRiskMerchant => weights.high_risk_merchant,
        }
    }

    pub fn is_triggered(&self, context: &FactorContext<'_>) -> bool {
        let transaction = context.transaction;
        let config = context.config;

        match self {
            RiskFactor::AmountAnomaly => match &context.baseline_mean {
                Some(mean) => transaction.amount > mean * context.amount_multiplier,
                None => false,
            },
            RiskFactor::OffHours => {
                let hour = utc_hour(transaction.timestamp);
                hour < config.off_hours_start || hour > config.off_hours_end
            }
            RiskFactor::ForeignLocation => transaction
                .location
                .as_deref()
                .map(|location| contains_ignore_case(location, &config.foreign_location_marker))
                .unwrap_or(false),
            RiskFactor::BurstFrequency => context.recent_count > config.burst_limit,
            RiskFactor::HighRiskMerchant => transaction
                .merchant
                .as_deref()
                .map(|merchant| {
                    config
                        .high_risk_merchants
                        .iter()
                        .any(|keyword| contains_ignore_case(merchant, keyword))
                })
                .unwrap_or(false),
        }
    }
}

/// Everything a factor needs to decide whether it fires.
#[derive(Debug, Clone)]
pub struct FactorContext<'a> {
    pub transaction: &'a Transaction,
    /// Mean amount over the baseline window, `None` when the window is empty.
    pub baseline_mean: Option<BigDecimal>,
    /// Same-account transactions inside the burst window.
    pub recent_count: i64,
    pub amount_multiplier: &'a BigDecimal,
    pub config: &'a RiskScorerConfig,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
