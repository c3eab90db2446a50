//! Business logic services for the Sail Risk service

pub mod assessment;
pub mod buoy;
pub mod fleet;
pub mod forecast;

pub use assessment::AssessmentService;
pub use buoy::BuoyService;
pub use fleet::{FleetAggregator, FleetSnapshot, ForecastSource, ObservationSource, StationResult};
pub use forecast::ForecastService;
