pub mod types;
pub mod store;
pub mod fraud;

pub use types::*;
pub use store::*;
pub use fraud::*;
