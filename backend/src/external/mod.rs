//! External API integrations

pub mod cache;
pub mod ndbc;
pub mod nws;

pub use cache::TtlCache;
pub use ndbc::NdbcClient;
pub use nws::{ForecastProduct, NwsClient};
