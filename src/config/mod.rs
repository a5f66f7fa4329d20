pub mod settings;
pub mod risk_scorer;

pub use settings::*;
pub use risk_scorer::*;
