use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Separator between factor labels in a stored alert reason.
pub const REASON_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudAlertStatus {
    Open,
    Dismissed,
    ConfirmedFraud,
}

impl FraudAlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudAlertStatus::Open => "OPEN",
            FraudAlertStatus::Dismissed => "DISMISSED",
            FraudAlertStatus::ConfirmedFraud => "CONFIRMED_FRAUD",
        }
    }
}

impl fmt::Display for FraudAlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FraudAlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(FraudAlertStatus::Open),
            "DISMISSED" => Ok(FraudAlertStatus::Dismissed),
            "CONFIRMED_FRAUD" => Ok(FraudAlertStatus::ConfirmedFraud),
            other => Err(format!("unknown fraud alert status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub risk_score: f64,
    pub reason: Option<String>,
    pub status: FraudAlertStatus,
    pub analyst_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFraudAlert {
    pub transaction_id: Uuid,
    pub risk_score: f64,
    pub reason: Option<String>,
}

impl CreateFraudAlert {
    /// Build the alert request for a scored transaction; the reason is the
    /// factor labels in evaluation order.
    pub fn from_factors(transaction_id: Uuid, risk_score: f64, factors: &[String]) -> Self {
        Self {
            transaction_id,
            risk_score,
            reason: Some(factors.join(REASON_SEPARATOR)),
        }
    }
}

impl FraudAlert {
    pub fn new(create_alert: CreateFraudAlert) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id: create_alert.transaction_id,
            risk_score: create_alert.risk_score,
            reason: create_alert.reason,
            status: FraudAlertStatus::Open,
            analyst_id: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Factor labels recovered from the stored reason.
    pub fn risk_factors(&self) -> Vec<&str> {
        self.reason
            .as_deref()
            .map(|reason| {
                reason
                    .split(REASON_SEPARATOR)
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.status == FraudAlertStatus::Open
    }
}
