// Errors produced while scoring a transaction
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use super::StoreError;
use crate::models::RiskAssessment;

#[derive(Error, Debug, Clone)]
pub enum FraudError {
    /// The account history could not be read; nothing was scored or persisted.
    #[error("Transaction history unavailable for account {account_id}: {source}")]
    HistoryUnavailable {
        account_id: Uuid,
        #[source]
        source: StoreError,
    },

    /// The score crossed the threshold but the alert write failed. The computed
    /// assessment travels with the error.
    #[error("Risk score {score:.2} crossed the alert threshold but the fraud alert could not be persisted: {source}", score = .assessment.risk_score)]
    AlertPersistFailure {
        assessment: Box<RiskAssessment>,
        #[source]
        source: StoreError,
    },

    #[error("Invalid transaction: {reason}")]
    InvalidTransaction { reason: String },
}

impl FraudError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        FraudError::InvalidTransaction { reason: reason.into() }
    }

    /// Assessment computed before the failure, if any.
    pub fn assessment(&self) -> Option<&RiskAssessment> {
        match self {
            FraudError::AlertPersistFailure { assessment, .. } => Some(assessment),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FraudError::InvalidTransaction { .. } => StatusCode::BAD_REQUEST,
            FraudError::HistoryUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            FraudError::AlertPersistFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FraudError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            FraudError::AlertPersistFailure { assessment, .. } => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "assessment": assessment,
            }),
            _ => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
