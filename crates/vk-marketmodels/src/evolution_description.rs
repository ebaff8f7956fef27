//! Evolution description: the rate grid and the simulation steps over it.

use crate::utilities::check_increasing_times;
use vk_core::{ensure, Result, Size, Time};

/// The rate times of a market model together with the times at which the
/// curve state is evolved.
///
/// For `n + 1` rate times there are `n` forward rates; step `j` ends at
/// `evolution_times[j]`, and `first_alive_rate(j)` is the first rate still
/// alive during that step.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionDescription {
    rate_times: Vec<Time>,
    rate_taus: Vec<Time>,
    evolution_times: Vec<Time>,
    first_alive_rate: Vec<Size>,
}

impl EvolutionDescription {
    /// Validate and build a description.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if fewer than
    /// two rate times are given, either grid is not strictly increasing, or
    /// the last evolution time is past the second-to-last rate time.
    pub fn new(rate_times: Vec<Time>, evolution_times: Vec<Time>) -> Result<Self> {
        ensure!(
            rate_times.len() > 1,
            "rate times must contain at least two values"
        );
        check_increasing_times(&rate_times)?;
        check_increasing_times(&evolution_times)?;
        let last_evolution = evolution_times[evolution_times.len() - 1];
        let last_fixing = rate_times[rate_times.len() - 2];
        ensure!(
            last_evolution <= last_fixing,
            "last evolution time ({last_evolution}) is after the last rate fixing ({last_fixing})"
        );

        let rate_taus = rate_times.windows(2).map(|w| w[1] - w[0]).collect();
        let mut first_alive_rate = Vec::with_capacity(evolution_times.len());
        let mut current = 0.0;
        let mut alive = 0;
        for &t in &evolution_times {
            while rate_times[alive] <= current && alive + 1 < rate_times.len() {
                alive += 1;
            }
            first_alive_rate.push(alive);
            current = t;
        }

        Ok(Self {
            rate_times,
            rate_taus,
            evolution_times,
            first_alive_rate,
        })
    }

    /// The rate fixing/payment grid `T_0 < … < T_n`.
    pub fn rate_times(&self) -> &[Time] {
        &self.rate_times
    }

    /// Accrual periods `T_{i+1} − T_i`.
    pub fn rate_taus(&self) -> &[Time] {
        &self.rate_taus
    }

    /// The ends of the simulation steps.
    pub fn evolution_times(&self) -> &[Time] {
        &self.evolution_times
    }

    /// First alive rate per step.
    pub fn first_alive_rate(&self) -> &[Size] {
        &self.first_alive_rate
    }

    /// Number of forward rates.
    pub fn number_of_rates(&self) -> Size {
        self.rate_times.len() - 1
    }

    /// Number of simulation steps.
    pub fn number_of_steps(&self) -> Size {
        self.evolution_times.len()
    }
}
