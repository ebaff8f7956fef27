//! A strip of forward-rate agreements, one product per period.

use crate::curve_state::CurveState;
use crate::evolution_description::EvolutionDescription;
use crate::multi_product::{CashFlow, CashFlowBuffer, MarketModelMultiProduct};
use crate::utilities::check_increasing_times;
use vk_core::{ensure, ensure_post, Rate, Real, Result, Size, Time};

/// Product `i` pays `(F_i − K_i)·α_i` at payment time `i`, fixed when the
/// `i`-th rate resets.
#[derive(Debug, Clone)]
pub struct MultiStepForwards {
    evolution: EvolutionDescription,
    accruals: Vec<Real>,
    payment_times: Vec<Time>,
    strikes: Vec<Rate>,
    current_index: Size,
}

impl MultiStepForwards {
    /// Build a strip of forwards over `rate_times` with strikes `strikes`.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) unless accruals,
    /// payment times and strikes all have one entry per period of
    /// `rate_times`.
    pub fn new(
        rate_times: Vec<Time>,
        accruals: Vec<Real>,
        payment_times: Vec<Time>,
        strikes: Vec<Rate>,
    ) -> Result<Self> {
        ensure!(rate_times.len() > 1, "rate times must contain at least two values");
        let periods = rate_times.len() - 1;
        ensure!(
            accruals.len() == periods,
            "{} accruals given, {periods} required",
            accruals.len()
        );
        ensure!(
            payment_times.len() == periods,
            "{} payment times given, {periods} required",
            payment_times.len()
        );
        ensure!(
            strikes.len() == periods,
            "{} strikes given, {periods} required",
            strikes.len()
        );
        check_increasing_times(&payment_times)?;

        let evolution_times = rate_times[..periods].to_vec();
        Ok(Self {
            evolution: EvolutionDescription::new(rate_times, evolution_times)?,
            accruals,
            payment_times,
            strikes,
            current_index: 0,
        })
    }

    /// Strike of each forward.
    pub fn strikes(&self) -> &[Rate] {
        &self.strikes
    }
}

impl MarketModelMultiProduct for MultiStepForwards {
    fn evolution(&self) -> &EvolutionDescription {
        &self.evolution
    }

    fn possible_cash_flow_times(&self) -> &[Time] {
        &self.payment_times
    }

    fn number_of_products(&self) -> Size {
        self.strikes.len()
    }

    fn max_number_of_cash_flows_per_product_per_step(&self) -> Size {
        1
    }

    fn reset(&mut self) {
        self.current_index = 0;
    }

    fn next_time_step(
        &mut self,
        state: &dyn CurveState,
        buffer: &mut CashFlowBuffer,
    ) -> Result<bool> {
        let i = self.current_index;
        ensure_post!(
            i < self.strikes.len(),
            "forwards stepped past their last period"
        );
        let libor = state.forward_rate(i)?;
        buffer.record(
            i,
            CashFlow {
                time_index: i,
                amount: (libor - self.strikes[i]) * self.accruals[i],
            },
        )?;
        self.current_index += 1;
        Ok(self.current_index < self.strikes.len())
    }

    fn clone_product(&self) -> Box<dyn MarketModelMultiProduct> {
        Box::new(self.clone())
    }
}
