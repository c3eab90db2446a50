//! Shared types and marine risk engine for the Sail Risk platform
//!
//! This crate holds everything that is a pure function of its inputs:
//! buoy report parsing, hourly forecast normalization, hazard signal
//! detection and per-leg risk classification. It performs no I/O and is
//! used by both the backend service and the WASM bindings.

pub mod buoy;
pub mod hourly;
pub mod models;
pub mod risk;
pub mod signals;
pub mod types;
pub mod units;
pub mod validation;

pub use models::*;
pub use types::*;
