use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorCount {
    pub factor: String,
    pub count: usize,
}

/// Aggregate view over stored fraud alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudInsights {
    pub total_alerts: usize,
    pub open_alerts: usize,
    pub confirmed_fraud: usize,
    pub dismissed: usize,
    /// Share of resolved alerts that were confirmed, in percent.
    pub confirmation_rate: Option<f64>,
    pub risk_distribution: RiskDistribution,
    pub top_risk_factors: Vec<RiskFactorCount>,
}
