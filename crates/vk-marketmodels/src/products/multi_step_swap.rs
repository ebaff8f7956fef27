//! Fixed-for-floating swap as a multi-step product.

use crate::curve_state::CurveState;
use crate::evolution_description::EvolutionDescription;
use crate::multi_product::{CashFlow, CashFlowBuffer, MarketModelMultiProduct};
use crate::utilities::check_increasing_times;
use vk_core::{ensure, ensure_post, Rate, Real, Result, Size, SwapType, Time};

/// A swap exchanging a fixed rate for the forward rate of each period.
///
/// At step `i` it records, both with time index `i`:
///
/// * fixed flow `−s·N·α_i·K`
/// * floating flow `+s·N·β_i·F_i`
///
/// where `s` is the [`SwapType`] sign (payer `+1`), `N` the nominal, `α`/`β`
/// the fixed/floating accruals, `K` the fixed rate and `F_i` the curve
/// state's forward rate `i`.  A receiver swap generates the exact negation of
/// the payer flows.
#[derive(Debug, Clone)]
pub struct MultiStepSwap {
    evolution: EvolutionDescription,
    fixed_accruals: Vec<Real>,
    floating_accruals: Vec<Real>,
    payment_times: Vec<Time>,
    fixed_rate: Rate,
    swap_type: SwapType,
    nominal: Real,
    last_index: Size,
    current_index: Size,
}

impl MultiStepSwap {
    /// Build a swap over `rate_times` (`n + 1` times, `n` periods) with one
    /// payment per period.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if the accruals
    /// or payment times do not have one entry per period, or a time grid is
    /// not strictly increasing.
    pub fn new(
        rate_times: Vec<Time>,
        fixed_accruals: Vec<Real>,
        floating_accruals: Vec<Real>,
        payment_times: Vec<Time>,
        fixed_rate: Rate,
        swap_type: SwapType,
    ) -> Result<Self> {
        ensure!(rate_times.len() > 1, "rate times must contain at least two values");
        let last_index = rate_times.len() - 1;
        ensure!(
            fixed_accruals.len() == last_index,
            "{} fixed accruals given, {last_index} required",
            fixed_accruals.len()
        );
        ensure!(
            floating_accruals.len() == last_index,
            "{} floating accruals given, {last_index} required",
            floating_accruals.len()
        );
        ensure!(
            payment_times.len() == last_index,
            "{} payment times given, {last_index} required",
            payment_times.len()
        );
        check_increasing_times(&payment_times)?;

        let evolution_times = rate_times[..last_index].to_vec();
        let evolution = EvolutionDescription::new(rate_times, evolution_times)?;
        Ok(Self {
            evolution,
            fixed_accruals,
            floating_accruals,
            payment_times,
            fixed_rate,
            swap_type,
            nominal: 1.0,
            last_index,
            current_index: 0,
        })
    }

    /// Scale every flow by `nominal` (default 1).
    pub fn with_nominal(mut self, nominal: Real) -> Self {
        self.nominal = nominal;
        self
    }

    /// Payer or receiver.
    pub fn swap_type(&self) -> SwapType {
        self.swap_type
    }

    /// The fixed rate.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_rate
    }

    /// The index of the next step to be taken.
    pub fn current_index(&self) -> Size {
        self.current_index
    }

    /// `true` once every period has been stepped through.
    pub fn is_done(&self) -> bool {
        self.current_index >= self.last_index
    }
}

impl MarketModelMultiProduct for MultiStepSwap {
    fn evolution(&self) -> &EvolutionDescription {
        &self.evolution
    }

    fn possible_cash_flow_times(&self) -> &[Time] {
        &self.payment_times
    }

    fn number_of_products(&self) -> Size {
        1
    }

    fn max_number_of_cash_flows_per_product_per_step(&self) -> Size {
        2
    }

    fn reset(&mut self) {
        tracing::trace!(steps = self.last_index, "swap reset");
        self.current_index = 0;
    }

    fn next_time_step(
        &mut self,
        state: &dyn CurveState,
        buffer: &mut CashFlowBuffer,
    ) -> Result<bool> {
        let i = self.current_index;
        ensure_post!(
            i < self.last_index,
            "swap stepped past its last period ({} periods)",
            self.last_index
        );
        let libor = state.forward_rate(i)?;
        let sign = self.swap_type.sign();

        buffer.record(
            0,
            CashFlow {
                time_index: i,
                amount: -sign * self.nominal * self.fixed_accruals[i] * self.fixed_rate,
            },
        )?;
        buffer.record(
            0,
            CashFlow {
                time_index: i,
                amount: sign * self.nominal * self.floating_accruals[i] * libor,
            },
        )?;

        self.current_index += 1;
        Ok(self.current_index < self.last_index)
    }

    fn clone_product(&self) -> Box<dyn MarketModelMultiProduct> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lmm_curve_state::LmmCurveState;
    use approx::assert_abs_diff_eq;

    const RATE_TIMES: [Time; 4] = [0.5, 1.0, 1.5, 2.0];

    fn swap(swap_type: SwapType) -> MultiStepSwap {
        MultiStepSwap::new(
            RATE_TIMES.to_vec(),
            vec![0.5; 3],
            vec![0.5; 3],
            vec![1.0, 1.5, 2.0],
            0.03,
            swap_type,
        )
        .unwrap()
    }

    fn curve_state(first: Size) -> LmmCurveState {
        let mut cs = LmmCurveState::new(RATE_TIMES.to_vec()).unwrap();
        cs.set_on_forward_rates(&[0.02, 0.03, 0.04], first).unwrap();
        cs
    }

    #[test]
    fn interface_constants() {
        let s = swap(SwapType::Payer);
        assert_eq!(s.number_of_products(), 1);
        assert_eq!(s.max_number_of_cash_flows_per_product_per_step(), 2);
        assert_eq!(s.possible_cash_flow_times(), &[1.0, 1.5, 2.0]);
        assert_eq!(s.evolution().evolution_times(), &[0.5, 1.0, 1.5]);
    }

    #[test]
    fn payer_flows() {
        let mut s = swap(SwapType::Payer).with_nominal(100.0);
        let mut buffer = CashFlowBuffer::for_product(&s);
        s.reset();
        assert!(s.next_time_step(&curve_state(0), &mut buffer).unwrap());
        let flows = buffer.flows(0);
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].time_index, 0);
        assert_abs_diff_eq!(flows[0].amount, -100.0 * 0.5 * 0.03, epsilon = 1e-14);
        assert_abs_diff_eq!(flows[1].amount, 100.0 * 0.5 * 0.02, epsilon = 1e-14);
    }

    #[test]
    fn receiver_is_the_negation_of_payer() {
        let mut payer = swap(SwapType::Payer);
        let mut receiver = swap(SwapType::Receiver);
        payer.reset();
        receiver.reset();
        for step in 0..3 {
            let state = curve_state(step);
            let mut bp = CashFlowBuffer::for_product(&payer);
            let mut br = CashFlowBuffer::for_product(&receiver);
            payer.next_time_step(&state, &mut bp).unwrap();
            receiver.next_time_step(&state, &mut br).unwrap();
            for (p, r) in bp.flows(0).iter().zip(br.flows(0)) {
                assert_eq!(p.time_index, step);
                assert_eq!(p.amount, -r.amount);
            }
        }
    }

    #[test]
    fn completes_after_last_period() {
        let mut s = swap(SwapType::Payer);
        let mut buffer = CashFlowBuffer::for_product(&s);
        s.reset();
        let mut more = Vec::new();
        for step in 0..3 {
            buffer.clear();
            assert_eq!(s.current_index(), step);
            more.push(s.next_time_step(&curve_state(step), &mut buffer).unwrap());
        }
        assert_eq!(more, vec![true, true, false]);
        assert!(s.is_done());

        buffer.clear();
        let err = s.next_time_step(&curve_state(2), &mut buffer).unwrap_err();
        assert!(err.is_invariant_violation());

        s.reset();
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn rejects_mismatched_terms() {
        assert!(MultiStepSwap::new(
            RATE_TIMES.to_vec(),
            vec![0.5; 2],
            vec![0.5; 3],
            vec![1.0, 1.5, 2.0],
            0.03,
            SwapType::Payer,
        )
        .is_err());
        assert!(MultiStepSwap::new(
            RATE_TIMES.to_vec(),
            vec![0.5; 3],
            vec![0.5; 3],
            vec![1.0, 2.0, 1.5],
            0.03,
            SwapType::Payer,
        )
        .is_err());
    }
}
