pub mod config;
pub mod models;
pub mod services;
pub mod handlers;
pub mod database;
pub mod utils;
pub mod error;

pub use error::types::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::database::{AlertStore, TransactionStore};
use crate::handlers::{create_fraud_alert_routes, create_fraud_routes, health_check, metrics_handler};
use crate::services::{AlertNotifier, FraudInsightsService, RiskScorer};
use crate::utils::monitoring::FraudMetrics;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub scorer: Arc<RiskScorer>,
    pub alert_store: Arc<dyn AlertStore>,
    pub insights: Arc<FraudInsightsService>,
    pub metrics: FraudMetrics,
}

impl AppState {
    /// Wire the scorer, insights and notifier around the given stores.
    pub fn new(
        settings: Settings,
        transaction_store: Arc<dyn TransactionStore>,
        alert_store: Arc<dyn AlertStore>,
    ) -> Result<Self, AppError> {
        let metrics = FraudMetrics::new()?;
        let notifier = Arc::new(AlertNotifier::new(&settings.alerts)?);

        let scorer = RiskScorer::new(settings.fraud.clone(), transaction_store, alert_store.clone())?
            .with_notifier(notifier)
            .with_metrics(metrics.clone());

        let insights = FraudInsightsService::new(alert_store.clone(), settings.fraud.threshold);

        Ok(Self {
            settings,
            scorer: Arc::new(scorer),
            alert_store,
            insights: Arc::new(insights),
            metrics,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", create_fraud_routes().merge(create_fraud_alert_routes()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
