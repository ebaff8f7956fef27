//! # valkit
//!
//! An interest-rate valuation toolkit: observable yield curves, tridiagonal
//! finite-difference operators, multi-step market-model products and an
//! analytic cap/floor engine.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the individual
//! `vk-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use valkit::core::RelinkableHandle;
//! use valkit::quotes::{Quote, SimpleQuote};
//! use valkit::termstructures::{FlatForward, YieldTermStructure};
//! use valkit::time::{Actual365Fixed, Date};
//!
//! let quote = RelinkableHandle::new(Arc::new(SimpleQuote::new(0.03)) as Arc<dyn Quote>);
//! let today = Date::from_ymd(2025, 1, 2).unwrap();
//! let curve = FlatForward::with_quote(today, quote.handle(), Actual365Fixed);
//! assert_eq!(curve.zero_yield(1.0, false).unwrap(), 0.03);
//!
//! quote.link_to(Arc::new(SimpleQuote::new(0.05)));
//! assert_eq!(curve.zero_yield(1.0, false).unwrap(), 0.05);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, errors and the observer pattern.
pub use vk_core as core;

/// Dates and day counters.
pub use vk_time as time;

/// Normal distribution and Black formula.
pub use vk_math as math;

/// Market quotes.
pub use vk_quotes as quotes;

/// Yield term structures.
pub use vk_termstructures as termstructures;

/// Finite-difference operators.
pub use vk_methods as methods;

/// Market-model curve states and multi-step products.
pub use vk_marketmodels as marketmodels;

/// Affine short-rate models.
pub use vk_models as models;

/// Instruments and the pricing-engine interface.
pub use vk_instruments as instruments;

/// Pricing engines.
pub use vk_pricingengines as pricingengines;
