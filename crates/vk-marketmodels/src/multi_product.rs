//! `MarketModelMultiProduct`: products that generate cash flows step by
//! step along a simulated path.
//!
//! The driver calls [`reset`](MarketModelMultiProduct::reset) once per path
//! and then [`next_time_step`](MarketModelMultiProduct::next_time_step) with
//! successive curve states, clearing the [`CashFlowBuffer`] before each step.
//! Accumulation and discounting of the recorded flows belong to the driver.

use crate::curve_state::CurveState;
use crate::evolution_description::EvolutionDescription;
use vk_core::{ensure_post, Error, Real, Result, Size, Time};

/// A cash flow generated at one step.
///
/// `time_index` points into the product's
/// [`possible_cash_flow_times`](MarketModelMultiProduct::possible_cash_flow_times).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    /// Index of the payment time.
    pub time_index: Size,
    /// Signed amount; positive amounts are received by the holder.
    pub amount: Real,
}

/// Per-product storage for the flows generated by one step.
///
/// Sized from a product's `number_of_products` and
/// `max_number_of_cash_flows_per_product_per_step`; recording more flows than
/// that bound is an invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowBuffer {
    flows: Vec<Vec<CashFlow>>,
    capacity: Size,
}

impl CashFlowBuffer {
    /// A buffer for `number_of_products` products holding up to
    /// `max_per_step` flows each.
    pub fn new(number_of_products: Size, max_per_step: Size) -> Self {
        Self {
            flows: (0..number_of_products)
                .map(|_| Vec::with_capacity(max_per_step))
                .collect(),
            capacity: max_per_step,
        }
    }

    /// A buffer sized for `product`.
    pub fn for_product(product: &dyn MarketModelMultiProduct) -> Self {
        Self::new(
            product.number_of_products(),
            product.max_number_of_cash_flows_per_product_per_step(),
        )
    }

    /// Drop every recorded flow, keeping the allocation.
    pub fn clear(&mut self) {
        self.flows.iter_mut().for_each(Vec::clear);
    }

    /// Record `flow` for `product`.
    ///
    /// # Errors
    /// * [`Error::IndexOutOfRange`] for an unknown product.
    /// * [`Error::Postcondition`] if the per-step bound is exceeded.
    pub fn record(&mut self, product: Size, flow: CashFlow) -> Result<()> {
        let size = self.flows.len();
        let capacity = self.capacity;
        let flows = self
            .flows
            .get_mut(product)
            .ok_or(Error::IndexOutOfRange { index: product, size })?;
        ensure_post!(
            flows.len() < capacity,
            "more than {capacity} cash flows recorded for product {product} in one step"
        );
        flows.push(flow);
        Ok(())
    }

    /// Flows recorded for `product` (empty for an unknown product).
    pub fn flows(&self, product: Size) -> &[CashFlow] {
        self.flows.get(product).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of flows recorded for `product`.
    pub fn number_of_cash_flows(&self, product: Size) -> Size {
        self.flows(product).len()
    }

    /// Number of products the buffer was sized for.
    pub fn number_of_products(&self) -> Size {
        self.flows.len()
    }

    /// Per-product, per-step bound.
    pub fn capacity(&self) -> Size {
        self.capacity
    }
}

/// A set of products valued together on one simulated path.
pub trait MarketModelMultiProduct: std::fmt::Debug + Send {
    /// The rate grid and simulation steps the products need.
    fn evolution(&self) -> &EvolutionDescription;

    /// Every time at which any of the products could pay, fixed at
    /// construction.
    fn possible_cash_flow_times(&self) -> &[Time];

    /// Number of independent valuation outputs.
    fn number_of_products(&self) -> Size;

    /// Upper bound on the flows any one product generates in one step.
    fn max_number_of_cash_flows_per_product_per_step(&self) -> Size;

    /// Rewind to the first step of a new path.
    fn reset(&mut self);

    /// Consume `state`, record this step's flows into `buffer` and advance.
    ///
    /// Returns `Ok(true)` while further steps remain and `Ok(false)` once the
    /// last step has been taken.
    ///
    /// # Errors
    /// [`Error::Postcondition`] when called on a completed product; errors
    /// from the curve state are propagated.
    fn next_time_step(&mut self, state: &dyn CurveState, buffer: &mut CashFlowBuffer)
        -> Result<bool>;

    /// A fresh copy for use on another path.
    fn clone_product(&self) -> Box<dyn MarketModelMultiProduct>;
}

impl Clone for Box<dyn MarketModelMultiProduct> {
    fn clone(&self) -> Self {
        self.clone_product()
    }
}
