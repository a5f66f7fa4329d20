pub mod logging;
pub mod monitoring;
pub mod time;

pub use logging::*;
pub use monitoring::*;
pub use time::*;
