pub mod alert_notifier;
pub mod fraud_insights;
pub mod risk_factors;
pub mod risk_scorer;
pub mod sample_alerts;

pub use alert_notifier::*;
pub use fraud_insights::{FraudInsightsService, summarize};
pub use risk_factors::*;
pub use risk_scorer::*;
pub use sample_alerts::*;
