//! Validation helpers shared by the market-model types.

use vk_core::{ensure, Result, Time};

/// Require `times` to be non-empty, non-negative and strictly increasing.
pub fn check_increasing_times(times: &[Time]) -> Result<()> {
    ensure!(!times.is_empty(), "at least one time is required");
    ensure!(times[0] >= 0.0, "first time ({}) is negative", times[0]);
    for (i, w) in times.windows(2).enumerate() {
        ensure!(
            w[1] > w[0],
            "non-increasing times: time[{}] = {}, time[{}] = {}",
            i,
            w[0],
            i + 1,
            w[1]
        );
    }
    Ok(())
}
