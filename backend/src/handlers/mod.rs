//! HTTP handlers

pub mod buoy;
pub mod forecast;
pub mod health;
pub mod legs;
pub mod risk;

pub use buoy::*;
pub use forecast::*;
pub use health::*;
pub use legs::*;
pub use risk::*;
