pub mod transaction;
pub mod fraud_alert;
pub mod risk_assessment;
pub mod sample_alert;
pub mod fraud_insights;

pub use transaction::*;
pub use fraud_alert::*;
pub use risk_assessment::*;
pub use sample_alert::*;
pub use fraud_insights::*;
