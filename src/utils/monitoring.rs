use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

use crate::error::AppError;

/// Prometheus collectors for the scoring pipeline, backed by a private
/// registry so several instances can coexist in tests.
#[derive(Clone)]
pub struct FraudMetrics {
    registry: Registry,
    pub transactions_scored: IntCounter,
    pub alerts_created: IntCounter,
    pub alert_persist_failures: IntCounter,
    pub history_failures: IntCounter,
    pub risk_score: Histogram,
}

impl FraudMetrics {
    pub fn new() -> Result<Self, AppError> {
        let registry = Registry::new();

        let transactions_scored = IntCounter::new(
            "fraud_transactions_scored_total",
            "Transactions that received a risk score",
        )?;
        let alerts_created = IntCounter::new(
            "fraud_alerts_created_total",
            "Fraud alerts persisted by the scorer",
        )?;
        let alert_persist_failures = IntCounter::new(
            "fraud_alert_persist_failures_total",
            "Scores above threshold whose alert could not be stored",
        )?;
        let history_failures = IntCounter::new(
            "fraud_history_failures_total",
            "Scoring attempts aborted because history was unavailable",
        )?;
        let risk_score = Histogram::with_opts(
            HistogramOpts::new("fraud_risk_score", "Distribution of clamped risk scores")
                .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]),
        )?;

        registry.register(Box::new(transactions_scored.clone()))?;
        registry.register(Box::new(alerts_created.clone()))?;
        registry.register(Box::new(alert_persist_failures.clone()))?;
        registry.register(Box::new(history_failures.clone()))?;
        registry.register(Box::new(risk_score.clone()))?;

        Ok(Self {
            registry,
            transactions_scored,
            alerts_created,
            alert_persist_failures,
            history_failures,
            risk_score,
        })
    }

    pub fn observe_score(&self, score: f64) {
        self.transactions_scored.inc();
        self.risk_score.observe(score);
    }

    /// Render all collectors in the Prometheus text exposition format.
    pub fn export_metrics(&self) -> Result<String, AppError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| AppError::InternalError(format!("Metrics are not valid UTF-8: {}", e)))
    }
}
