//! Curve state parameterised by simply-compounded forward rates.

use crate::curve_state::CurveState;
use crate::utilities::check_increasing_times;
use vk_core::{ensure, DiscountFactor, Error, Rate, Real, Result, Size, Time};

/// A [`CurveState`] built from the forward rates `F_i` over the rate grid.
///
/// With `d_first = 1` and `d_{i+1} = d_i / (1 + τ_i·F_i)`, discount ratios,
/// coterminal annuities and coterminal swap rates are derived whenever the
/// forwards are set.
#[derive(Debug, Clone, PartialEq)]
pub struct LmmCurveState {
    rate_times: Vec<Time>,
    rate_taus: Vec<Time>,
    first: Size,
    forward_rates: Vec<Rate>,
    discount_ratios: Vec<DiscountFactor>,
    coterminal_annuities: Vec<Real>,
    coterminal_swap_rates: Vec<Rate>,
}

impl LmmCurveState {
    /// An unset state over `rate_times`.
    ///
    /// # Errors
    /// [`Error::Precondition`] if fewer than two rate times are given or
    /// they are not strictly increasing.
    pub fn new(rate_times: Vec<Time>) -> Result<Self> {
        ensure!(
            rate_times.len() > 1,
            "rate times must contain at least two values"
        );
        check_increasing_times(&rate_times)?;
        let n = rate_times.len() - 1;
        let rate_taus = rate_times.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(Self {
            rate_times,
            rate_taus,
            first: n,
            forward_rates: vec![0.0; n],
            discount_ratios: vec![1.0; n + 1],
            coterminal_annuities: vec![0.0; n],
            coterminal_swap_rates: vec![0.0; n],
        })
    }

    /// Set the forwards, of which those before `first_valid_index` are dead.
    ///
    /// # Errors
    /// [`Error::Precondition`] on a length mismatch, an out-of-range index,
    /// or a forward with `1 + τ·F <= 0`.
    pub fn set_on_forward_rates(&mut self, rates: &[Rate], first_valid_index: Size) -> Result<()> {
        let n = self.rate_taus.len();
        ensure!(
            rates.len() == n,
            "rates mismatch: {} rates given, {n} required",
            rates.len()
        );
        ensure!(
            first_valid_index < n,
            "first valid index ({first_valid_index}) must be less than {n}"
        );

        for i in first_valid_index..n {
            ensure!(
                1.0 + self.rate_taus[i] * rates[i] > 0.0,
                "forward rate {i} ({}) implies a non-positive discount ratio",
                rates[i]
            );
        }

        self.first = first_valid_index;
        self.forward_rates.copy_from_slice(rates);
        self.discount_ratios[first_valid_index] = 1.0;
        for i in first_valid_index..n {
            self.discount_ratios[i + 1] =
                self.discount_ratios[i] / (1.0 + self.rate_taus[i] * rates[i]);
        }

        self.coterminal_annuities[n - 1] = self.rate_taus[n - 1] * self.discount_ratios[n];
        for i in (first_valid_index..n - 1).rev() {
            self.coterminal_annuities[i] =
                self.coterminal_annuities[i + 1] + self.rate_taus[i] * self.discount_ratios[i + 1];
        }
        for i in first_valid_index..n {
            self.coterminal_swap_rates[i] = (self.discount_ratios[i] - self.discount_ratios[n])
                / self.coterminal_annuities[i];
        }
        Ok(())
    }

    /// Index of the first alive rate.
    pub fn first_valid_index(&self) -> Size {
        self.first
    }

    fn check_alive(&self, i: Size, upper: Size) -> Result<()> {
        if i >= upper {
            return Err(Error::IndexOutOfRange { index: i, size: upper });
        }
        ensure!(
            i >= self.first,
            "index {i} refers to a dead or unset rate (first valid index {})",
            self.first
        );
        Ok(())
    }
}

impl CurveState for LmmCurveState {
    fn rate_times(&self) -> &[Time] {
        &self.rate_times
    }

    fn rate_taus(&self) -> &[Time] {
        &self.rate_taus
    }

    fn forward_rate(&self, i: Size) -> Result<Rate> {
        self.check_alive(i, self.rate_taus.len())?;
        Ok(self.forward_rates[i])
    }

    fn discount_ratio(&self, i: Size, j: Size) -> Result<DiscountFactor> {
        let size = self.discount_ratios.len();
        self.check_alive(i, size)?;
        self.check_alive(j, size)?;
        Ok(self.discount_ratios[i] / self.discount_ratios[j])
    }

    fn coterminal_swap_rate(&self, i: Size) -> Result<Rate> {
        self.check_alive(i, self.rate_taus.len())?;
        Ok(self.coterminal_swap_rates[i])
    }

    fn coterminal_swap_annuity(&self, numeraire: Size, i: Size) -> Result<Real> {
        self.check_alive(i, self.rate_taus.len())?;
        self.check_alive(numeraire, self.discount_ratios.len())?;
        Ok(self.coterminal_annuities[i] / self.discount_ratios[numeraire])
    }
}
