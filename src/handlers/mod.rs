pub mod health;
pub mod metrics;
pub mod fraud_handlers;
pub mod fraud_alert_handlers;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use fraud_handlers::create_fraud_routes;
pub use fraud_alert_handlers::create_fraud_alert_routes;
