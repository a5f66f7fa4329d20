use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::database::AlertStore;
use crate::error::AppError;
use crate::models::{FraudAlert, FraudAlertStatus, FraudInsights, RiskDistribution, RiskFactorCount};

/// Alerts above this score count as high risk.
pub const HIGH_RISK_SCORE: f64 = 0.85;
/// How many of the most recent alerts feed the summary.
pub const INSIGHTS_ALERT_LIMIT: i64 = 10_000;
const TOP_FACTOR_COUNT: usize = 5;

pub struct FraudInsightsService {
    alert_store: Arc<dyn AlertStore>,
    threshold: f64,
}

impl FraudInsightsService {
    pub fn new(alert_store: Arc<dyn AlertStore>, threshold: f64) -> Self {
        Self { alert_store, threshold }
    }

    pub async fn load_insights(&self) -> Result<FraudInsights, AppError> {
        let alerts = self.alert_store.list_alerts(0, INSIGHTS_ALERT_LIMIT).await?;
        info!("Summarizing {} fraud alerts", alerts.len());
        Ok(summarize(&alerts, self.threshold))
    }
}

pub fn summarize(alerts: &[FraudAlert], threshold: f64) -> FraudInsights {
    let count_status = |status: FraudAlertStatus| alerts.iter().filter(|a| a.status == status).count();

    let confirmed_fraud = count_status(FraudAlertStatus::ConfirmedFraud);
    let dismissed = count_status(FraudAlertStatus::Dismissed);
    let resolved = confirmed_fraud + dismissed;
    let confirmation_rate = (resolved > 0).then(|| confirmed_fraud as f64 / resolved as f64 * 100.0);

    let mut risk_distribution = RiskDistribution::default();
    for alert in alerts {
        if alert.risk_score > HIGH_RISK_SCORE {
            risk_distribution.high_risk += 1;
        } else if alert.risk_score >= threshold {
            risk_distribution.medium_risk += 1;
        } else {
            risk_distribution.low_risk += 1;
        }
    }

    let mut factor_counts: HashMap<String, usize> = HashMap::new();
    for factor in alerts.iter().flat_map(|a| a.risk_factors()) {
        *factor_counts.entry(factor.to_string()).or_insert(0) += 1;
    }

    let mut top_risk_factors: Vec<RiskFactorCount> = factor_counts
        .into_iter()
        .map(|(factor, count)| RiskFactorCount { factor, count })
        .collect();
    top_risk_factors.sort_by(|a, b| (Reverse(a.count), &a.factor).cmp(&(Reverse(b.count), &b.factor)));
    top_risk_factors.truncate(TOP_FACTOR_COUNT);

    FraudInsights {
        total_alerts: alerts.len(),
        open_alerts: count_status(FraudAlertStatus::Open),
        confirmed_fraud,
        dismissed,
        confirmation_rate,
        risk_distribution,
        top_risk_factors,
    }
}
