use bigdecimal::BigDecimal;
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::alert_notifier::AlertNotifier;
use super::risk_factors::{FactorContext, RiskFactor};
use crate::config::RiskScorerConfig;
use crate::database::{AlertStore, TransactionStore};
use crate::error::{AppError, FraudError, StoreError};
use crate::models::{CreateFraudAlert, RiskAssessment, Transaction, TransactionHistory};
use crate::utils::monitoring::FraudMetrics;
use crate::utils::time::TimeWindow;

/// Decimal places kept from the summed weights before clamping.
const SCORE_PRECISION: f64 = 1_000_000.0;

pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

fn round_score(v: f64) -> f64 {
    (v * SCORE_PRECISION).round() / SCORE_PRECISION
}

/// Result of the pure scoring step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Sum of the triggered weights before clamping.
    pub raw_score: f64,
    pub risk_score: f64,
    pub triggered: Vec<RiskFactor>,
}

impl ScoreBreakdown {
    pub fn labels(&self) -> Vec<String> {
        self.triggered.iter().map(|f| f.label().to_string()).collect()
    }
}

/// Rule-based fraud scorer. Loads account history, scores the transaction
/// against five weighted factors and records an alert when the score reaches
/// the configured threshold.
pub struct RiskScorer {
    config: RiskScorerConfig,
    amount_multiplier: BigDecimal,
    transaction_store: Arc<dyn TransactionStore>,
    alert_store: Arc<dyn AlertStore>,
    notifier: Option<Arc<AlertNotifier>>,
    metrics: Option<FraudMetrics>,
}

impl RiskScorer {
    pub fn new(
        config: RiskScorerConfig,
        transaction_store: Arc<dyn TransactionStore>,
        alert_store: Arc<dyn AlertStore>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let amount_multiplier = BigDecimal::from_str(&config.amount_multiplier.to_string())
            .map_err(|e| AppError::ConfigError(format!("Invalid fraud.amount_multiplier: {}", e)))?;

        Ok(Self {
            config,
            amount_multiplier,
            transaction_store,
            alert_store,
            notifier: None,
            metrics: None,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<AlertNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_metrics(mut self, metrics: FraudMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RiskScorerConfig {
        &self.config
    }

    /// Score a transaction against already loaded history. No store access.
    pub fn score(
        &self,
        transaction: &Transaction,
        history: &TransactionHistory,
        recent_count: i64,
    ) -> ScoreBreakdown {
        let context = FactorContext {
            transaction,
            baseline_mean: history.mean_amount(),
            recent_count,
            amount_multiplier: &self.amount_multiplier,
            config: &self.config,
        };

        let (raw_score, triggered) = RiskFactor::ALL
            .iter()
            .filter(|factor| factor.is_triggered(&context))
            .fold((0.0, Vec::new()), |(sum, mut triggered), factor| {
                triggered.push(*factor);
                (sum + factor.weight(&self.config.weights), triggered)
            });

        ScoreBreakdown {
            raw_score,
            risk_score: clamp01(round_score(raw_score)),
            triggered,
        }
    }

    /// Validate, load history, score, and persist an alert when the score
    /// reaches the threshold.
    pub async fn analyze(&self, transaction: &Transaction) -> Result<RiskAssessment, FraudError> {
        transaction.validate(Utc::now(), self.config.max_future_skew())?;

        let (history, recent_count) = self.load_history(transaction).await?;
        self.decide(transaction, &history, recent_count).await
    }

    /// Same as [`analyze`](Self::analyze) with history already loaded by the
    /// caller. Alerts are still persisted through the alert store.
    pub async fn analyze_with_history(
        &self,
        transaction: &Transaction,
        history: &TransactionHistory,
        recent_count: i64,
    ) -> Result<RiskAssessment, FraudError> {
        transaction.validate(Utc::now(), self.config.max_future_skew())?;
        self.decide(transaction, history, recent_count).await
    }

    async fn decide(
        &self,
        transaction: &Transaction,
        history: &TransactionHistory,
        recent_count: i64,
    ) -> Result<RiskAssessment, FraudError> {
        let breakdown = self.score(transaction, history, recent_count);

        if let Some(metrics) = &self.metrics {
            metrics.observe_score(breakdown.risk_score);
        }

        info!(
            transaction_id = %transaction.id,
            account_id = %transaction.account_id,
            risk_score = breakdown.risk_score,
            factor_count = breakdown.triggered.len(),
            "Scored transaction"
        );

        let risk_factors = breakdown.labels();

        if breakdown.risk_score < self.config.threshold {
            return Ok(RiskAssessment::normal(breakdown.risk_score, risk_factors));
        }

        let create_alert =
            CreateFraudAlert::from_factors(transaction.id, breakdown.risk_score, &risk_factors);

        let alert = match self.alert_store.create_alert(create_alert).await {
            Ok(alert) => alert,
            Err(source) => {
                error!(
                    "Failed to persist fraud alert for transaction {}: {}",
                    transaction.id, source
                );
                if let Some(metrics) = &self.metrics {
                    metrics.alert_persist_failures.inc();
                }
                return Err(FraudError::AlertPersistFailure {
                    assessment: Box::new(RiskAssessment::flagged(
                        breakdown.risk_score,
                        risk_factors,
                        None,
                    )),
                    source,
                });
            }
        };

        warn!(
            "Fraud alert {} raised for transaction {} (score {:.2})",
            alert.id, transaction.id, alert.risk_score
        );
        if let Some(metrics) = &self.metrics {
            metrics.alerts_created.inc();
        }

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.notify(&alert).await {
                error!("Failed to send fraud alert notification: {}", e);
            }
        }

        Ok(RiskAssessment::flagged(
            breakdown.risk_score,
            risk_factors,
            Some(alert.id),
        ))
    }

    async fn load_history(
        &self,
        transaction: &Transaction,
    ) -> Result<(TransactionHistory, i64), FraudError> {
        let account_id = transaction.account_id;
        let baseline = TimeWindow::trailing(transaction.timestamp, self.config.baseline_window());
        let burst = TimeWindow::trailing(transaction.timestamp, self.config.burst_window());

        let history = self
            .transaction_store
            .recent_transactions(account_id, baseline.since, baseline.until, transaction.id)
            .await
            .map_err(|source| self.history_failure(account_id, source))?;

        let recent_count = self
            .transaction_store
            .count_transactions(account_id, burst.since, burst.until, transaction.id)
            .await
            .map_err(|source| self.history_failure(account_id, source))?;

        debug!(
            "Loaded {} baseline transactions and {} recent for account {}",
            history.len(),
            recent_count,
            account_id
        );

        Ok((TransactionHistory::from(history), recent_count))
    }

    fn history_failure(&self, account_id: Uuid, source: StoreError) -> FraudError {
        error!("Transaction history unavailable for account {}: {}", account_id, source);
        if let Some(metrics) = &self.metrics {
            metrics.history_failures.inc();
        }
        FraudError::HistoryUnavailable { account_id, source }
    }
}
