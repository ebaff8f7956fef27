//! # vk-marketmodels
//!
//! Market-model building blocks: the forward-rate curve state seen at each
//! simulation step, the description of the steps themselves, and products
//! that turn a sequence of curve states into cash flows.
//!
//! Path generation and discounting of the flows are left to the caller;
//! [`simulate_path`] shows the stepping protocol on a precomputed path.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `CurveState` trait.
pub mod curve_state;

/// `EvolutionDescription`: rate grid and simulation steps.
pub mod evolution_description;

/// `LmmCurveState`: curve state on forward rates.
pub mod lmm_curve_state;

/// `MarketModelMultiProduct` trait and cash-flow buffers.
pub mod multi_product;

/// Swaps, forward strips and composites.
pub mod products;

/// Driving a product along one path.
pub mod simulation;

/// Time-grid checks.
pub mod utilities;

pub use curve_state::CurveState;
pub use evolution_description::EvolutionDescription;
pub use lmm_curve_state::LmmCurveState;
pub use multi_product::{CashFlow, CashFlowBuffer, MarketModelMultiProduct};
pub use products::{MultiProductComposite, MultiStepForwards, MultiStepSwap};
pub use simulation::simulate_path;
