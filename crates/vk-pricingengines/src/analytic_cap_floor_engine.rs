//! Analytic cap/floor engine for affine short-rate models.
//!
//! A caplet paying `τ·max(L − c, 0)` at `S` on the rate fixed at `T` is
//! worth `(1 + cτ)` puts on the zero-coupon bond `P(T, S)` struck at
//! `1/(1 + cτ)`; a floorlet is the corresponding call.  A collar is long the
//! caplets and short the floorlets.

use std::sync::Arc;
use vk_core::{Error, OptionType, Real, Result};
use vk_instruments::{CapFloorArguments, PricingEngine, PricingResults};
use vk_models::AffineModel;

/// Prices caps, floors and collars with an [`AffineModel`]'s closed-form
/// bond options.
#[derive(Debug, Clone, Default)]
pub struct AnalyticCapFloorEngine {
    model: Option<Arc<dyn AffineModel>>,
}

impl AnalyticCapFloorEngine {
    /// Engine pricing with `model`.
    pub fn new(model: Arc<dyn AffineModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Engine without a model; pricing fails until one is set.
    pub fn without_model() -> Self {
        Self::default()
    }

    /// Replace the model.
    pub fn set_model(&mut self, model: Arc<dyn AffineModel>) {
        self.model = Some(model);
    }

    /// The current model, if any.
    pub fn model(&self) -> Option<&Arc<dyn AffineModel>> {
        self.model.as_ref()
    }
}

impl PricingEngine<CapFloorArguments> for AnalyticCapFloorEngine {
    /// Sum the caplet and floorlet values over the periods in ascending
    /// order.
    ///
    /// # Errors
    /// * [`Error::Precondition`] if no model is set, checked before anything
    ///   else, or if the arguments are inconsistent.
    /// * Errors from the model's bond-option pricer.
    fn calculate(&self, args: &CapFloorArguments) -> Result<PricingResults> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::Precondition("cannot price without model".into()))?;
        args.validate()?;

        let cap_floor_type = args.cap_floor_type;
        let mut value: Real = 0.0;
        for i in 0..args.number_of_periods() {
            let maturity = args.start_times[i];
            let bond = args.end_times[i];
            let tenor = args.accrual_times[i];

            if cap_floor_type.has_cap() {
                let temp = 1.0 + args.cap_rates[i] * tenor;
                value += args.nominals[i]
                    * temp
                    * model.discount_bond_option(OptionType::Put, 1.0 / temp, maturity, bond)?;
            }
            if cap_floor_type.has_floor() {
                let temp = 1.0 + args.floor_rates[i] * tenor;
                let mult = if cap_floor_type.has_cap() { -1.0 } else { 1.0 };
                value += args.nominals[i]
                    * temp
                    * mult
                    * model.discount_bond_option(OptionType::Call, 1.0 / temp, maturity, bond)?;
            }
        }

        tracing::debug!(
            %cap_floor_type,
            periods = args.number_of_periods(),
            value,
            "cap/floor priced"
        );
        Ok(PricingResults::from_value(value))
    }
}
