use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertPriority {
    High,
    Medium,
}

impl AlertPriority {
    /// Scores strictly above 0.85 are HIGH.
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score > 0.85 {
            AlertPriority::High
        } else {
            AlertPriority::Medium
        }
    }
}

/// Illustrative alert served to demo dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleAlert {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub amount: f64,
    pub description: String,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub timestamp: String,
    pub status: String,
    pub location: String,
    pub merchant: String,
    pub priority: AlertPriority,
}
