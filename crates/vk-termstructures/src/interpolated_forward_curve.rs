//! `InterpolatedForwardCurve`: a yield curve defined by instantaneous
//! forward rates at pillar dates.
//!
//! Between pillars the forward is interpolated (backward-flat or linear);
//! beyond the last pillar it is continued flat.  Discount factors use the
//! exact integral of the interpolant, `P(t) = exp(−∫₀ᵗ f(s) ds)`, so the
//! discount, zero-yield and forward queries are consistent to rounding.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::{YieldTermStructure, YieldTermStructureData};
use std::sync::{Arc, Weak};
use vk_core::{ensure, DiscountFactor, Observable, Observer, Rate, Real, Result, Time};
use vk_time::{Date, DayCounter};

/// How the forward rate is interpolated between pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardInterpolation {
    /// On `(t_{i−1}, t_i]` the forward equals the value at `t_i`.
    #[default]
    BackwardFlat,
    /// Linear in time between neighbouring pillars.
    Linear,
}

/// A yield curve built from instantaneous forward rates at known dates.
#[derive(Debug)]
pub struct InterpolatedForwardCurve {
    data: YieldTermStructureData,
    dates: Vec<Date>,
    times: Vec<Time>,
    forwards: Vec<Rate>,
    // ∫₀^{t_i} f(s) ds at every pillar
    integrals: Vec<Real>,
    interpolation: ForwardInterpolation,
}

impl InterpolatedForwardCurve {
    /// Build the curve from pillar `dates` (the first one is the reference
    /// date) and the forward rates at those dates.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if fewer than two
    /// pillars are given, lengths differ, or the pillar times are not
    /// strictly increasing.
    pub fn new(
        dates: &[Date],
        forwards: &[Rate],
        day_counter: impl DayCounter + 'static,
        interpolation: ForwardInterpolation,
    ) -> Result<Self> {
        ensure!(
            dates.len() >= 2,
            "need at least 2 dates (reference + 1 pillar), got {}",
            dates.len()
        );
        ensure!(
            dates.len() == forwards.len(),
            "dates ({}) and forwards ({}) must have the same length",
            dates.len(),
            forwards.len()
        );

        let data = YieldTermStructureData::new(dates[0], day_counter);
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| data.day_counter.year_fraction(dates[0], d))
            .collect();
        for (i, w) in times.windows(2).enumerate() {
            ensure!(
                w[1] > w[0],
                "pillar dates must be strictly increasing ({} after {})",
                dates[i + 1],
                dates[i]
            );
        }

        let mut curve = Self {
            data,
            dates: dates.to_vec(),
            times,
            forwards: forwards.to_vec(),
            integrals: Vec::with_capacity(dates.len()),
            interpolation,
        };
        curve.integrals.push(0.0);
        for i in 1..curve.times.len() {
            let prev = curve.integrals[i - 1];
            curve.integrals.push(prev + curve.partial_integral(i, curve.times[i]));
        }
        Ok(curve)
    }

    /// The pillar dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The pillar forward rates.
    pub fn forwards(&self) -> &[Rate] {
        &self.forwards
    }

    // Index `i` such that `t_{i−1} < t <= t_i`, for `0 < t <= t_n`.
    fn segment(&self, t: Time) -> usize {
        self.times.partition_point(|&ti| ti < t).max(1)
    }

    fn interpolate(&self, i: usize, t: Time) -> Rate {
        match self.interpolation {
            ForwardInterpolation::BackwardFlat => self.forwards[i],
            ForwardInterpolation::Linear => {
                let (t0, t1) = (self.times[i - 1], self.times[i]);
                let (f0, f1) = (self.forwards[i - 1], self.forwards[i]);
                f0 + (f1 - f0) * (t - t0) / (t1 - t0)
            }
        }
    }

    // ∫ f over (t_{i−1}, t] for t inside segment i.
    fn partial_integral(&self, i: usize, t: Time) -> Real {
        let dt = t - self.times[i - 1];
        match self.interpolation {
            ForwardInterpolation::BackwardFlat => self.forwards[i] * dt,
            ForwardInterpolation::Linear => 0.5 * (self.forwards[i - 1] + self.interpolate(i, t)) * dt,
        }
    }

    fn integral(&self, t: Time) -> Real {
        let last = self.times.len() - 1;
        if t <= 0.0 {
            0.0
        } else if t >= self.times[last] {
            self.integrals[last] + self.forwards[last] * (t - self.times[last])
        } else {
            let i = self.segment(t);
            self.integrals[i - 1] + self.partial_integral(i, t)
        }
    }
}

impl Observable for InterpolatedForwardCurve {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.data.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.data.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.data.observers.notify();
    }
}

impl TermStructure for InterpolatedForwardCurve {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> Arc<dyn DayCounter> {
        Arc::clone(&self.data.day_counter)
    }

    fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    fn max_time(&self) -> Time {
        self.times[self.times.len() - 1]
    }
}

impl YieldTermStructure for InterpolatedForwardCurve {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        Ok((-self.integral(t)).exp())
    }

    fn zero_yield_impl(&self, t: Time) -> Result<Rate> {
        if t == 0.0 {
            return self.forward_impl(0.0);
        }
        Ok(self.integral(t) / t)
    }

    fn forward_impl(&self, t: Time) -> Result<Rate> {
        let last = self.times.len() - 1;
        Ok(if t <= 0.0 {
            self.forwards[0]
        } else if t >= self.times[last] {
            self.forwards[last]
        } else {
            self.interpolate(self.segment(t), t)
        })
    }
}
