use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FLAGGED_RECOMMENDATION: &str = "Transaction flagged for manual review";
pub const NORMAL_RECOMMENDATION: &str = "Transaction appears normal";

/// Verdict returned for a single scored transaction. Never persisted; only
/// the alert it may reference is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub is_fraud_risk: bool,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<Uuid>,
    pub recommendation: String,
}

impl RiskAssessment {
    pub fn normal(risk_score: f64, risk_factors: Vec<String>) -> Self {
        Self {
            is_fraud_risk: false,
            risk_score,
            risk_factors,
            alert_id: None,
            recommendation: NORMAL_RECOMMENDATION.to_string(),
        }
    }

    /// Flagged verdict; `alert_id` is `None` only when the alert write failed.
    pub fn flagged(risk_score: f64, risk_factors: Vec<String>, alert_id: Option<Uuid>) -> Self {
        Self {
            is_fraud_risk: true,
            risk_score,
            risk_factors,
            alert_id,
            recommendation: FLAGGED_RECOMMENDATION.to_string(),
        }
    }
}
