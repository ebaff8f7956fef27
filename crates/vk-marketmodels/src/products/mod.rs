//! Concrete multi-step products.

mod composite;
mod multi_step_forwards;
mod multi_step_swap;

pub use composite::MultiProductComposite;
pub use multi_step_forwards::MultiStepForwards;
pub use multi_step_swap::MultiStepSwap;
