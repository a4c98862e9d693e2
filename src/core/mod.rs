pub mod clock;
pub mod config;
mod responses;
mod telemetry;

pub use self::config::AppConfig;
pub use clock::{Clock, FixedClock, SystemClock};
pub use responses::*;
pub use telemetry::*;
