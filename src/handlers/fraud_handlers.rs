use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, FraudError};
use crate::models::{FraudInsights, RiskAssessment, SampleAlert, Transaction};
use crate::services::generate_sample_alerts;
use crate::AppState;

const DEFAULT_SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SampleAlertsQuery {
    pub limit: Option<usize>,
}

/// Score a posted transaction and raise an alert when it crosses the threshold.
///
/// With the PostgreSQL stores the transaction must already be ingested into
/// `transactions`: `fraud_alerts.transaction_id` is a foreign key, so flagging
/// an unknown transaction fails the alert write and the caller gets a 500
/// carrying the computed assessment.
pub async fn analyze_transaction(
    State(state): State<AppState>,
    Json(transaction): Json<Transaction>,
) -> Result<Json<RiskAssessment>, FraudError> {
    let assessment = state.scorer.analyze(&transaction).await?;
    Ok(Json(assessment))
}

pub async fn get_sample_alerts(
    Query(query): Query<SampleAlertsQuery>,
) -> Json<Vec<SampleAlert>> {
    let limit = query.limit.unwrap_or(DEFAULT_SAMPLE_LIMIT);
    Json(generate_sample_alerts(limit, Utc::now()))
}

pub async fn get_fraud_insights(
    State(state): State<AppState>,
) -> Result<Json<FraudInsights>, AppError> {
    let insights = state.insights.load_insights().await?;
    Ok(Json(insights))
}

/// Routes mounted under `/api/v1/fraud`.
pub fn create_fraud_routes() -> Router<AppState> {
    Router::new()
        .route("/fraud/analyze", post(analyze_transaction))
        .route("/fraud/alerts/sample", get(get_sample_alerts))
        .route("/fraud/insights", get(get_fraud_insights))
}
