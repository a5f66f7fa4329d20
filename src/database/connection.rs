use sqlx::{PgPool, postgres::PgPoolOptions};
use crate::config::DatabaseSettings;
use crate::error::AppError;
use tracing::{info, error};
use std::time::Duration;

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<PgPool, AppError> {
    info!("Establishing database connection");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&settings.url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            AppError::DatabaseError(format!("Connection failed: {}", e))
        })?;

    info!("Database connection established successfully");
    Ok(pool)
}
