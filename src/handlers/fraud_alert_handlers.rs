use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateFraudAlert, FraudAlert};
use crate::AppState;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct ListFraudAlertsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn create_fraud_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateFraudAlert>,
) -> Result<(StatusCode, Json<FraudAlert>), AppError> {
    if !(0.0..=1.0).contains(&request.risk_score) {
        return Err(AppError::ValidationError(format!(
            "risk_score must be within [0, 1], got {}",
            request.risk_score
        )));
    }

    let alert = state.alert_store.create_alert(request).await?;
    info!("Created fraud alert {} for transaction {}", alert.id, alert.transaction_id);

    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn list_fraud_alerts(
    State(state): State<AppState>,
    Query(query): Query<ListFraudAlertsQuery>,
) -> Result<Json<Vec<FraudAlert>>, AppError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    if skip < 0 || !(0..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::ValidationError(format!(
            "skip must be >= 0 and limit within [0, {}]",
            MAX_PAGE_SIZE
        )));
    }

    let alerts = state.alert_store.list_alerts(skip, limit).await?;
    Ok(Json(alerts))
}

pub async fn get_fraud_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FraudAlert>, AppError> {
    state
        .alert_store
        .get_alert(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Fraud alert {} not found", id)))
}

pub fn create_fraud_alert_routes() -> Router<AppState> {
    Router::new()
        .route("/fraud-alerts", get(list_fraud_alerts).post(create_fraud_alert))
        .route("/fraud-alerts/:id", get(get_fraud_alert))
}
