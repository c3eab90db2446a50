//! Domain models for marine conditions and route risk

mod assessment;
mod forecast;
mod leg;
mod observation;

pub use assessment::*;
pub use forecast::*;
pub use leg::*;
pub use observation::*;
