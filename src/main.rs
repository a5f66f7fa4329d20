use fraud_risk_monitor::{
    build_router,
    config::Settings,
    database::{establish_connection, run_migrations, PgAlertStore, PgTransactionStore},
    utils::logging::init_logging,
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_logging(&settings.logging)?;

    info!("Starting Fraud Risk Monitor v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = establish_connection(&settings.database).await?;
    if settings.database.run_migrations {
        run_migrations(&db_pool).await?;
    }

    let transaction_store = Arc::new(PgTransactionStore::new(db_pool.clone()));
    let alert_store = Arc::new(PgAlertStore::new(db_pool.clone()));
    let state = AppState::new(settings.clone(), transaction_store, alert_store)?;

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);
    info!("  POST   /api/v1/fraud/analyze - Score a transaction");
    info!("  GET    /api/v1/fraud/alerts/sample - Demo fraud alerts");
    info!("  GET    /api/v1/fraud/insights - Fraud alert statistics");
    info!("  GET    /api/v1/fraud-alerts - List fraud alerts");
    info!("  POST   /api/v1/fraud-alerts - Create fraud alert");
    info!("  GET    /api/v1/fraud-alerts/{{id}} - Get fraud alert");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    info!("Shutting down Fraud Risk Monitor");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}
