pub mod traits;
pub mod connection;
pub mod migrations;
pub mod transaction_repo;
pub mod alert_repo;
pub mod memory;

pub use traits::*;
pub use connection::*;
pub use migrations::*;
pub use transaction_repo::*;
pub use alert_repo::*;
pub use memory::*;
