//! # vk-pricingengines
//!
//! Pricing engines.
//!
//! - [`AnalyticCapFloorEngine`]: caps, floors and collars priced with the
//!   closed-form bond options of an affine short-rate model

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Analytic cap/floor engine.
pub mod analytic_cap_floor_engine;

pub use analytic_cap_floor_engine::AnalyticCapFloorEngine;
