use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::AppState;

/// Prometheus scrape endpoint.
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    debug!("Serving Prometheus metrics");

    let metrics_text = state.metrics.export_metrics()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        metrics_text,
    )
        .into_response())
}
