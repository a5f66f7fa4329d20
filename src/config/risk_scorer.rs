use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Weight contributed by each risk factor when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub amount_anomaly: f64,
    pub off_hours: f64,
    pub foreign_location: f64,
    pub burst_frequency: f64,
    pub high_risk_merchant: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            amount_anomaly: 0.3,
            off_hours: 0.2,
            foreign_location: 0.4,
            burst_frequency: 0.25,
            high_risk_merchant: 0.3,
        }
    }
}

impl FactorWeights {
    fn all(&self) -> [(&'static str, f64); 5] {
        [
            ("amount_anomaly", self.amount_anomaly),
            ("off_hours", self.off_hours),
            ("foreign_location", self.foreign_location),
            ("burst_frequency", self.burst_frequency),
            ("high_risk_merchant", self.high_risk_merchant),
        ]
    }
}

/// Tunables of the transaction risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskScorerConfig {
    /// Minimum clamped score that raises a fraud alert.
    pub threshold: f64,
    pub weights: FactorWeights,
    /// The amount factor fires when the amount exceeds this multiple of the
    /// baseline mean.
    pub amount_multiplier: f64,
    pub baseline_window_days: i64,
    pub burst_window_minutes: i64,
    /// The frequency factor fires when the burst count is strictly greater.
    pub burst_limit: i64,
    /// Hours before this one (UTC) are off-hours.
    pub off_hours_start: u32,
    /// Hours after this one (UTC) are off-hours.
    pub off_hours_end: u32,
    pub foreign_location_marker: String,
    pub high_risk_merchants: Vec<String>,
    pub max_future_skew_seconds: i64,
}

impl Default for RiskScorerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            weights: FactorWeights::default(),
            amount_multiplier: 5.0,
            baseline_window_days: 30,
            burst_window_minutes: 60,
            burst_limit: 5,
            off_hours_start: 6,
            off_hours_end: 22,
            foreign_location_marker: "foreign".to_string(),
            high_risk_merchants: vec![
                "casino".to_string(),
                "gambling".to_string(),
                "bitcoin".to_string(),
                "crypto".to_string(),
            ],
            max_future_skew_seconds: 300,
        }
    }
}

impl RiskScorerConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn baseline_window(&self) -> Duration {
        Duration::days(self.baseline_window_days)
    }

    pub fn burst_window(&self) -> Duration {
        Duration::minutes(self.burst_window_minutes)
    }

    pub fn max_future_skew(&self) -> Duration {
        Duration::seconds(self.max_future_skew_seconds)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(AppError::ConfigError(format!(
                "fraud.threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }

        for (name, weight) in self.weights.all() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::ConfigError(format!(
                    "fraud.weights.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        if !self.amount_multiplier.is_finite() || self.amount_multiplier <= 0.0 {
            return Err(AppError::ConfigError(format!(
                "fraud.amount_multiplier must be positive, got {}",
                self.amount_multiplier
            )));
        }

        if self.baseline_window_days <= 0 || self.burst_window_minutes <= 0 {
            return Err(AppError::ConfigError(
                "fraud lookback windows must be positive".to_string(),
            ));
        }

        if self.burst_limit < 0 || self.max_future_skew_seconds < 0 {
            return Err(AppError::ConfigError(
                "fraud.burst_limit and fraud.max_future_skew_seconds must not be negative".to_string(),
            ));
        }

        if self.off_hours_start > 23 || self.off_hours_end > 23 {
            return Err(AppError::ConfigError(format!(
                "fraud off-hours bounds must be valid hours, got {}..{}",
                self.off_hours_start, self.off_hours_end
            )));
        }

        if self.foreign_location_marker.trim().is_empty() {
            return Err(AppError::ConfigError(
                "fraud.foreign_location_marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RiskScorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.baseline_window(), Duration::days(30));
        assert_eq!(config.burst_window(), Duration::hours(1));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let config = RiskScorerConfig::default().with_threshold(1.5);
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = RiskScorerConfig::default();
        config.weights.off_hours = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: RiskScorerConfig =
            serde_json::from_str(r#"{"threshold": 0.5, "weights": {"off_hours": 0.1}}"#).unwrap();

        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.weights.off_hours, 0.1);
        assert_eq!(config.weights.foreign_location, 0.4);
        assert_eq!(config.high_risk_merchants.len(), 4);
    }
}
