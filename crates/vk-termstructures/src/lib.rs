//! # vk-termstructures
//!
//! Yield term structures.
//!
//! Curves are shared as `Arc<dyn YieldTermStructure>` and observe the quotes
//! and curves they are built on.  A change upstream invalidates cached values
//! and propagates downstream immediately; the recomputation itself waits for
//! the next query.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `FlatForward`: constant forward-rate curve.
pub mod flat_forward;

/// `InterpolatedForwardCurve`: curve from pillar forward rates.
pub mod interpolated_forward_curve;

/// `TermStructure` base trait.
pub mod term_structure;

/// `YieldTermStructure` trait and shared curve data.
pub mod yield_term_structure;

/// `ZeroSpreadedTermStructure`: base curve plus a zero-yield spread.
pub mod zero_spreaded_term_structure;

pub use flat_forward::FlatForward;
pub use interpolated_forward_curve::{ForwardInterpolation, InterpolatedForwardCurve};
pub use term_structure::TermStructure;
pub use yield_term_structure::{YieldTermStructure, YieldTermStructureData};
pub use zero_spreaded_term_structure::ZeroSpreadedTermStructure;
