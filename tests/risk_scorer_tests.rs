mod common;

use chrono::Duration;
use uuid::Uuid;

use common::{at_hour, baseline, Harness, TransactionBuilder};
use fraud_risk_monitor::{
    config::RiskScorerConfig,
    error::{FraudError, StoreError},
    models::{FraudAlertStatus, TransactionHistory, FLAGGED_RECOMMENDATION, NORMAL_RECOMMENDATION},
    services::{RiskFactor, RiskScorer},
    utils::monitoring::FraudMetrics,
};

#[tokio::test]
async fn test_large_amount_in_unflagged_location_is_not_fraud() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(14);
    let harness = Harness::new(baseline(account_id, "100.00", 10, ts));

    let tx = TransactionBuilder::new(account_id, "5000.00", ts)
        .location("Nigeria, Lagos")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert!(!assessment.is_fraud_risk);
    assert!((assessment.risk_score - 0.3).abs() < 1e-9);
    assert_eq!(assessment.risk_factors, vec!["Unusually high transaction amount"]);
    assert_eq!(assessment.alert_id, None);
    assert_eq!(assessment.recommendation, NORMAL_RECOMMENDATION);
    assert!(harness.alerts.alerts().await.is_empty());
}

#[tokio::test]
async fn test_foreign_night_spike_raises_alert() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(2);
    let harness = Harness::new(baseline(account_id, "100.00", 10, ts));

    let tx = TransactionBuilder::new(account_id, "900.00", ts)
        .location("foreign branch ATM")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert!(assessment.is_fraud_risk);
    assert!((assessment.risk_score - 0.9).abs() < 1e-9);
    assert_eq!(assessment.recommendation, FLAGGED_RECOMMENDATION);

    let alerts = harness.alerts.alerts().await;
    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(Some(alert.id), assessment.alert_id);
    assert_eq!(alert.transaction_id, tx.id);
    assert_eq!(alert.status, FraudAlertStatus::Open);
    assert_eq!(
        alert.reason.as_deref(),
        Some("Unusually high transaction amount; Transaction outside normal hours; Foreign location transaction")
    );
}

#[tokio::test]
async fn test_crypto_merchant_alone_stays_below_threshold() {
    let account_id = Uuid::new_v4();
    let harness = Harness::new(Vec::new());

    let tx = TransactionBuilder::new(account_id, "120.00", at_hour(12))
        .merchant("CryptoBuy Exchange")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert!(!assessment.is_fraud_risk);
    assert!((assessment.risk_score - 0.3).abs() < 1e-9);
    assert_eq!(assessment.risk_factors, vec!["High-risk merchant category"]);
    assert!(harness.alerts.alerts().await.is_empty());
}

#[tokio::test]
async fn test_empty_history_only_skips_amount_factor() {
    let account_id = Uuid::new_v4();
    let harness = Harness::new(Vec::new());

    let tx = TransactionBuilder::new(account_id, "99999.99", at_hour(23))
        .location("Foreign")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert_eq!(
        assessment.risk_factors,
        vec!["Transaction outside normal hours", "Foreign location transaction"]
    );
    assert!((assessment.risk_score - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn test_history_outside_baseline_window_is_ignored() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(12);
    let stale = TransactionBuilder::new(account_id, "1.00", ts - Duration::days(31)).build();
    let harness = Harness::new(vec![stale]);

    let tx = TransactionBuilder::new(account_id, "500.00", ts).build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert!(assessment.risk_factors.is_empty());
    assert_eq!(assessment.risk_score, 0.0);
}

#[tokio::test]
async fn test_burst_count_excludes_transaction_under_evaluation() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(12);
    let mut history: Vec<_> = (1..=5)
        .map(|m| TransactionBuilder::new(account_id, "20.00", ts - Duration::minutes(m * 5)).build())
        .collect();

    let tx = TransactionBuilder::new(account_id, "20.00", ts).build();
    // The transaction itself is already stored, as after ingestion.
    history.push(tx.clone());
    let harness = Harness::new(history);

    let assessment = harness.scorer.analyze(&tx).await.unwrap();
    assert!(!assessment.risk_factors.contains(&RiskFactor::BurstFrequency.label().to_string()));

    harness
        .transactions
        .insert(TransactionBuilder::new(account_id, "20.00", ts - Duration::minutes(59)).build())
        .await;
    let assessment = harness.scorer.analyze(&tx).await.unwrap();
    assert_eq!(assessment.risk_factors, vec!["High transaction frequency"]);
    assert!((assessment.risk_score - 0.25).abs() < 1e-9);
}

#[tokio::test]
async fn test_same_instant_postings_count_toward_burst_and_baseline() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(12);
    let mut history: Vec<_> = (0..6)
        .map(|_| TransactionBuilder::new(account_id, "20.00", ts).build())
        .collect();

    let tx = TransactionBuilder::new(account_id, "20.00", ts).build();
    history.push(tx.clone());
    let harness = Harness::new(history);

    let assessment = harness.scorer.analyze(&tx).await.unwrap();
    assert_eq!(assessment.risk_factors, vec!["High transaction frequency"]);
    assert!((assessment.risk_score - 0.25).abs() < 1e-9);

    // a same-instant spike is judged against its siblings
    let spike = TransactionBuilder::new(account_id, "100.01", ts).build();
    let assessment = harness.scorer.analyze(&spike).await.unwrap();
    assert_eq!(
        assessment.risk_factors,
        vec!["Unusually high transaction amount", "High transaction frequency"]
    );
    assert!((assessment.risk_score - 0.55).abs() < 1e-9);
}

#[tokio::test]
async fn test_score_at_threshold_creates_alert() {
    let harness = Harness::new(Vec::new());

    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(12))
        .location("foreign")
        .merchant("Lucky Casino")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert_eq!(assessment.risk_score, 0.7);
    assert!(assessment.is_fraud_risk);
    assert_eq!(harness.alerts.alerts().await.len(), 1);
}

#[tokio::test]
async fn test_all_factors_clamp_to_one_in_label_order() {
    let account_id = Uuid::new_v4();
    let ts = at_hour(1);
    let mut history = baseline(account_id, "10.00", 5, ts);
    history.extend((1..=6).map(|m| TransactionBuilder::new(account_id, "10.00", ts - Duration::minutes(m)).build()));
    let harness = Harness::new(history);

    let tx = TransactionBuilder::new(account_id, "5000.00", ts)
        .location("foreign")
        .merchant("gambling den")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert_eq!(assessment.risk_score, 1.0);
    let expected: Vec<String> = RiskFactor::ALL.iter().map(|f| f.label().to_string()).collect();
    assert_eq!(assessment.risk_factors, expected);
}

#[tokio::test]
async fn test_repeated_analysis_creates_fresh_alerts() {
    let harness = Harness::new(Vec::new());
    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(3))
        .location("foreign")
        .merchant("crypto")
        .build();

    let first = harness.scorer.analyze(&tx).await.unwrap();
    let second = harness.scorer.analyze(&tx).await.unwrap();

    assert_eq!(first.risk_score, second.risk_score);
    assert_eq!(first.risk_factors, second.risk_factors);
    assert_ne!(first.alert_id, second.alert_id);
    assert_eq!(harness.alerts.alerts().await.len(), 2);
}

#[tokio::test]
async fn test_history_failure_aborts_without_alert() {
    let harness = Harness::new(Vec::new());
    harness
        .transactions
        .fail_with(StoreError::Unavailable("connection refused".to_string()))
        .await;

    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(3))
        .location("foreign")
        .merchant("casino")
        .build();
    let err = harness.scorer.analyze(&tx).await.unwrap_err();

    match err {
        FraudError::HistoryUnavailable { account_id, source } => {
            assert_eq!(account_id, tx.account_id);
            assert!(source.is_transient());
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(harness.alerts.alerts().await.is_empty());
}

#[tokio::test]
async fn test_alert_failure_carries_assessment() {
    let harness = Harness::new(Vec::new());
    harness
        .alerts
        .fail_with(StoreError::ConstraintViolation {
            constraint: "fraud_alerts_transaction_id_fkey".to_string(),
            message: "transaction does not exist".to_string(),
        })
        .await;

    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(2))
        .location("foreign")
        .merchant("casino")
        .build();
    let err = harness.scorer.analyze(&tx).await.unwrap_err();

    let assessment = err.assessment().expect("assessment travels with the error");
    assert!(assessment.is_fraud_risk);
    assert_eq!(assessment.alert_id, None);
    assert!((assessment.risk_score - 0.9).abs() < 1e-9);
    assert_eq!(assessment.risk_factors.len(), 3);
    assert!(matches!(
        err,
        FraudError::AlertPersistFailure { source: StoreError::ConstraintViolation { .. }, .. }
    ));
}

#[tokio::test]
async fn test_alert_failure_irrelevant_below_threshold() {
    let harness = Harness::new(Vec::new());
    harness.alerts.fail_with(StoreError::Unavailable("down".to_string())).await;

    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(12)).build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();
    assert!(!assessment.is_fraud_risk);
}

#[tokio::test]
async fn test_invalid_transaction_rejected_before_store_access() {
    let harness = Harness::new(Vec::new());
    harness.transactions.fail_with(StoreError::Unavailable("down".to_string())).await;

    let tx = TransactionBuilder::new(Uuid::new_v4(), "10.005", at_hour(12)).build();
    let err = harness.scorer.analyze(&tx).await.unwrap_err();
    assert!(matches!(err, FraudError::InvalidTransaction { .. }));

    let future = TransactionBuilder::new(Uuid::new_v4(), "10.00", chrono::Utc::now() + Duration::hours(1)).build();
    let err = harness.scorer.analyze(&future).await.unwrap_err();
    assert!(matches!(err, FraudError::InvalidTransaction { .. }));
}

#[tokio::test]
async fn test_configured_threshold_and_weights_apply() {
    let mut config = RiskScorerConfig::default().with_threshold(0.25);
    config.weights.high_risk_merchant = 0.5;
    let harness = Harness::with_config(Vec::new(), config);

    let tx = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(12))
        .merchant("Bitcoin Depot")
        .build();
    let assessment = harness.scorer.analyze(&tx).await.unwrap();

    assert!(assessment.is_fraud_risk);
    assert_eq!(assessment.risk_score, 0.5);
}

#[tokio::test]
async fn test_metrics_track_outcomes() {
    let harness = Harness::new(Vec::new());
    let metrics = FraudMetrics::new().unwrap();
    let scorer = RiskScorer::new(
        RiskScorerConfig::default(),
        harness.transactions.clone(),
        harness.alerts.clone(),
    )
    .unwrap()
    .with_metrics(metrics.clone());

    let flagged = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(2))
        .location("foreign")
        .merchant("casino")
        .build();
    let normal = TransactionBuilder::new(Uuid::new_v4(), "45.00", at_hour(12)).build();

    scorer.analyze(&flagged).await.unwrap();
    scorer.analyze(&normal).await.unwrap();

    harness.alerts.fail_with(StoreError::Unavailable("down".to_string())).await;
    assert!(scorer.analyze(&flagged).await.is_err());

    harness.transactions.fail_with(StoreError::Unavailable("down".to_string())).await;
    assert!(scorer.analyze(&normal).await.is_err());

    assert_eq!(metrics.transactions_scored.get(), 3);
    assert_eq!(metrics.alerts_created.get(), 1);
    assert_eq!(metrics.alert_persist_failures.get(), 1);
    assert_eq!(metrics.history_failures.get(), 1);
}

#[test]
fn test_pure_scoring_matches_analysis() {
    let harness = Harness::new(Vec::new());
    let account_id = Uuid::new_v4();
    let ts = at_hour(4);
    let history = TransactionHistory::from(baseline(account_id, "50.00", 3, ts));

    let tx = TransactionBuilder::new(account_id, "260.00", ts).build();
    let breakdown = harness.scorer.score(&tx, &history, 0);

    assert_eq!(breakdown.triggered, vec![RiskFactor::AmountAnomaly, RiskFactor::OffHours]);
    assert!((breakdown.risk_score - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_caller_supplied_history_skips_store_reads() {
    let harness = Harness::new(Vec::new());
    harness.transactions.fail_with(StoreError::Unavailable("down".to_string())).await;

    let account_id = Uuid::new_v4();
    let ts = at_hour(2);
    let history = TransactionHistory::from(baseline(account_id, "100.00", 4, ts));
    let tx = TransactionBuilder::new(account_id, "900.00", ts)
        .location("Foreign branch ATM")
        .build();

    let assessment = harness.scorer.analyze_with_history(&tx, &history, 0).await.unwrap();

    assert!(assessment.is_fraud_risk);
    assert_eq!(assessment.risk_factors.len(), 3);
    assert_eq!(harness.alerts.alerts().await[0].id, assessment.alert_id.unwrap());
}
