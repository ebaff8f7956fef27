//! `TermStructure`: base trait for all term structures.
//!
//! Every term structure has a **reference date**, a **day counter**, and a
//! **maximum date** (the furthest point queries may reach without
//! extrapolation).  Term structures are observable so that whatever is built
//! on them (spreaded curves, instruments) hears about changes.

use std::sync::Arc;
use vk_core::{ensure_domain, Observable, Result, Time};
use vk_time::{Date, DayCounter};

/// Base trait for all term structures.
pub trait TermStructure: Observable + std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date → time conversions.
    fn day_counter(&self) -> Arc<dyn DayCounter>;

    /// The latest date for which the curve can be queried without
    /// extrapolation.
    fn max_date(&self) -> Date;

    /// The latest time for which the curve can be queried without
    /// extrapolation.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Year fraction between the reference date and `date`.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter().year_fraction(self.reference_date(), date)
    }

    /// Fail with [`Error::Domain`](vk_core::Error::Domain) if `t` is negative,
    /// or past [`max_time`](Self::max_time) while `extrapolate` is false.
    fn check_range(&self, t: Time, extrapolate: bool) -> Result<()> {
        ensure_domain!(t >= 0.0, "negative time ({t}) given");
        let max = self.max_time();
        ensure_domain!(
            extrapolate || t <= max || close_to(t, max),
            "time ({t}) is past max curve time ({max})"
        );
        Ok(())
    }
}

fn close_to(t: Time, max: Time) -> bool {
    (t - max).abs() <= 1.0e-12 * max.abs().max(1.0)
}
