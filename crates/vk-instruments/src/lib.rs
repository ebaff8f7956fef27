//! # vk-instruments
//!
//! Financial instruments and the engine interface they are priced through.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Caps, floors and collars.
pub mod cap_floor;

/// `Instrument`, `PricingEngine` and `PricingResults`.
pub mod instrument;

pub use cap_floor::{CapFloor, CapFloorArguments, CapFloorType};
pub use instrument::{Instrument, PricingEngine, PricingResults};
