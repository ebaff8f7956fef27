//! Caps, floors and collars on a strip of forward rates.

use crate::instrument::{Instrument, PricingEngine, PricingResults};
use std::fmt;
use vk_core::{ensure, Handle, Rate, Real, Result, Settings, Size, Time};
use vk_termstructures::{TermStructure, YieldTermStructure};
use vk_time::{Date, DayCounter};

/// Which legs a [`CapFloor`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapFloorType {
    /// Long caplets only.
    Cap,
    /// Long floorlets only.
    Floor,
    /// Long cap, short floor.
    Collar,
}

impl CapFloorType {
    /// `true` for caps and collars.
    pub fn has_cap(self) -> bool {
        matches!(self, CapFloorType::Cap | CapFloorType::Collar)
    }

    /// `true` for floors and collars.
    pub fn has_floor(self) -> bool {
        matches!(self, CapFloorType::Floor | CapFloorType::Collar)
    }
}

impl fmt::Display for CapFloorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapFloorType::Cap => write!(f, "cap"),
            CapFloorType::Floor => write!(f, "floor"),
            CapFloorType::Collar => write!(f, "collar"),
        }
    }
}

/// Engine input for a cap, floor or collar.
///
/// Period `i` accrues over `accrual_times[i]` years, fixes (and expires as a
/// bond option) at `start_times[i]` and pays at `end_times[i]`.  Rates of a
/// leg the instrument does not carry may be left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CapFloorArguments {
    /// Which legs are active.
    pub cap_floor_type: CapFloorType,
    /// Fixing times.
    pub start_times: Vec<Time>,
    /// Payment times.
    pub end_times: Vec<Time>,
    /// Accrual year fractions.
    pub accrual_times: Vec<Time>,
    /// Cap strike per period.
    pub cap_rates: Vec<Rate>,
    /// Floor strike per period.
    pub floor_rates: Vec<Rate>,
    /// Notional per period.
    pub nominals: Vec<Real>,
}

impl CapFloorArguments {
    /// Number of periods.
    pub fn number_of_periods(&self) -> Size {
        self.end_times.len()
    }

    /// Check that every per-period vector has one entry per period and that
    /// the periods are well formed.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) describing the
    /// first problem found.
    pub fn validate(&self) -> Result<()> {
        let n = self.number_of_periods();
        ensure!(
            self.start_times.len() == n,
            "{} start times given for {n} periods",
            self.start_times.len()
        );
        ensure!(
            self.accrual_times.len() == n,
            "{} accrual times given for {n} periods",
            self.accrual_times.len()
        );
        ensure!(
            self.nominals.len() == n,
            "{} nominals given for {n} periods",
            self.nominals.len()
        );
        if self.cap_floor_type.has_cap() {
            ensure!(
                self.cap_rates.len() == n,
                "{} cap rates given for {n} periods",
                self.cap_rates.len()
            );
        }
        if self.cap_floor_type.has_floor() {
            ensure!(
                self.floor_rates.len() == n,
                "{} floor rates given for {n} periods",
                self.floor_rates.len()
            );
        }
        for i in 0..n {
            ensure!(
                self.start_times[i] >= 0.0 && self.end_times[i] >= self.start_times[i],
                "period {i} runs from {} to {}",
                self.start_times[i],
                self.end_times[i]
            );
            ensure!(
                self.accrual_times[i] >= 0.0,
                "negative accrual ({}) in period {i}",
                self.accrual_times[i]
            );
        }
        Ok(())
    }
}

/// A cap, floor or collar on consecutive periods of a date schedule.
///
/// Times are measured from the reference date of the term structure behind
/// the handle, with its day counter; the handle is read whenever arguments
/// are built, so a relinked curve is picked up by the next valuation.
#[derive(Debug, Clone)]
pub struct CapFloor {
    cap_floor_type: CapFloorType,
    schedule: Vec<Date>,
    nominals: Vec<Real>,
    cap_rates: Vec<Rate>,
    floor_rates: Vec<Rate>,
    term_structure: Handle<dyn YieldTermStructure>,
}

impl CapFloor {
    /// Build an instrument on the periods `schedule[i]..schedule[i + 1]`.
    ///
    /// `nominals` and the strike vectors may be shorter than the number of
    /// periods; their last value then applies to the remaining periods.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) if the schedule
    /// has fewer than two dates or is not increasing, a vector is longer than
    /// the number of periods, or an active leg has no strikes.
    pub fn new(
        cap_floor_type: CapFloorType,
        schedule: Vec<Date>,
        nominals: Vec<Real>,
        cap_rates: Vec<Rate>,
        floor_rates: Vec<Rate>,
        term_structure: Handle<dyn YieldTermStructure>,
    ) -> Result<Self> {
        ensure!(schedule.len() >= 2, "schedule needs at least two dates");
        for w in schedule.windows(2) {
            ensure!(w[1] > w[0], "schedule dates must increase ({} after {})", w[1], w[0]);
        }
        let periods = schedule.len() - 1;
        let nominals = extend_to(nominals, periods, "nominals")?;
        let cap_rates = if cap_floor_type.has_cap() {
            extend_to(cap_rates, periods, "cap rates")?
        } else {
            Vec::new()
        };
        let floor_rates = if cap_floor_type.has_floor() {
            extend_to(floor_rates, periods, "floor rates")?
        } else {
            Vec::new()
        };
        Ok(Self {
            cap_floor_type,
            schedule,
            nominals,
            cap_rates,
            floor_rates,
            term_structure,
        })
    }

    /// A cap struck at `cap_rates`.
    pub fn cap(
        schedule: Vec<Date>,
        nominals: Vec<Real>,
        cap_rates: Vec<Rate>,
        term_structure: Handle<dyn YieldTermStructure>,
    ) -> Result<Self> {
        Self::new(CapFloorType::Cap, schedule, nominals, cap_rates, Vec::new(), term_structure)
    }

    /// A floor struck at `floor_rates`.
    pub fn floor(
        schedule: Vec<Date>,
        nominals: Vec<Real>,
        floor_rates: Vec<Rate>,
        term_structure: Handle<dyn YieldTermStructure>,
    ) -> Result<Self> {
        Self::new(CapFloorType::Floor, schedule, nominals, Vec::new(), floor_rates, term_structure)
    }

    /// Which legs the instrument carries.
    pub fn cap_floor_type(&self) -> CapFloorType {
        self.cap_floor_type
    }

    /// The period boundary dates.
    pub fn schedule(&self) -> &[Date] {
        &self.schedule
    }

    /// Build the engine arguments against the current term structure.
    ///
    /// Periods fixing before the reference date are left out.
    ///
    /// # Errors
    /// [`Error::NullValue`](vk_core::Error::NullValue) if the term-structure
    /// handle is empty.
    pub fn arguments(&self) -> Result<CapFloorArguments> {
        let curve = self.term_structure.get()?;
        let reference = curve.reference_date();
        let day_counter = curve.day_counter();

        let mut args = CapFloorArguments {
            cap_floor_type: self.cap_floor_type,
            start_times: Vec::new(),
            end_times: Vec::new(),
            accrual_times: Vec::new(),
            cap_rates: Vec::new(),
            floor_rates: Vec::new(),
            nominals: Vec::new(),
        };
        for (i, w) in self.schedule.windows(2).enumerate() {
            let (start, end) = (w[0], w[1]);
            if start < reference {
                continue;
            }
            args.start_times.push(day_counter.year_fraction(reference, start));
            args.end_times.push(day_counter.year_fraction(reference, end));
            args.accrual_times.push(day_counter.year_fraction(start, end));
            args.nominals.push(self.nominals[i]);
            if let Some(&rate) = self.cap_rates.get(i) {
                args.cap_rates.push(rate);
            }
            if let Some(&rate) = self.floor_rates.get(i) {
                args.floor_rates.push(rate);
            }
        }
        args.validate()?;
        Ok(args)
    }

    /// Value with `engine`; an expired instrument is worth zero.
    ///
    /// # Errors
    /// Propagates failures from building the arguments or from the engine.
    pub fn value(&self, engine: &dyn PricingEngine<CapFloorArguments>) -> Result<Real> {
        Ok(self.price(engine)?.value)
    }

    /// Full results from `engine`.
    ///
    /// # Errors
    /// Propagates failures from building the arguments or from the engine.
    pub fn price(&self, engine: &dyn PricingEngine<CapFloorArguments>) -> Result<PricingResults> {
        if self.is_expired() {
            return Ok(PricingResults::from_value(0.0));
        }
        engine.calculate(&self.arguments()?)
    }

    fn today(&self) -> Option<Date> {
        Settings::instance()
            .evaluation_date_serial()
            .and_then(|serial| Date::from_serial(serial).ok())
            .or_else(|| self.term_structure.current().map(|c| c.reference_date()))
    }
}

impl Instrument for CapFloor {
    /// Expired once the last payment date is before the evaluation date
    /// (the curve's reference date when no evaluation date is set).
    fn is_expired(&self) -> bool {
        match (self.today(), self.maturity_date()) {
            (Some(today), Some(maturity)) => maturity < today,
            _ => false,
        }
    }

    fn maturity_date(&self) -> Option<Date> {
        self.schedule.last().copied()
    }
}

fn extend_to(mut values: Vec<Real>, periods: Size, what: &str) -> Result<Vec<Real>> {
    ensure!(!values.is_empty(), "no {what} given");
    ensure!(
        values.len() <= periods,
        "{} {what} given for {periods} periods",
        values.len()
    );
    let last = values[values.len() - 1];
    values.resize(periods, last);
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;
    use vk_core::{RelinkableHandle, ScopedEvaluationDate};
    use vk_termstructures::FlatForward;
    use vk_time::{Actual360, Actual365Fixed};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn curve(reference: Date) -> Handle<dyn YieldTermStructure> {
        let ts: Arc<dyn YieldTermStructure> = FlatForward::new(reference, 0.03, Actual365Fixed);
        Handle::new(ts)
    }

    fn schedule() -> Vec<Date> {
        vec![date(2026, 1, 2), date(2026, 7, 2), date(2027, 1, 2)]
    }

    #[derive(Debug)]
    struct NominalSum;

    impl PricingEngine<CapFloorArguments> for NominalSum {
        fn calculate(&self, args: &CapFloorArguments) -> Result<PricingResults> {
            Ok(PricingResults::from_value(args.nominals.iter().sum()))
        }
    }

    #[test]
    fn arguments_use_curve_day_counter() {
        let cap = CapFloor::cap(schedule(), vec![100.0], vec![0.04], curve(date(2025, 1, 2))).unwrap();
        let args = cap.arguments().unwrap();
        assert_eq!(args.number_of_periods(), 2);
        assert_abs_diff_eq!(args.start_times[0], 365.0 / 365.0, epsilon = 1e-15);
        assert_abs_diff_eq!(args.end_times[0], 546.0 / 365.0, epsilon = 1e-15);
        assert_abs_diff_eq!(args.accrual_times[1], 184.0 / 365.0, epsilon = 1e-15);
        assert_eq!(args.cap_rates, vec![0.04, 0.04]);
        assert_eq!(args.nominals, vec![100.0, 100.0]);
        assert!(args.floor_rates.is_empty());
    }

    #[test]
    fn started_periods_are_dropped() {
        let floor =
            CapFloor::floor(schedule(), vec![1.0, 2.0], vec![0.01], curve(date(2026, 3, 1))).unwrap();
        let args = floor.arguments().unwrap();
        assert_eq!(args.number_of_periods(), 1);
        assert_eq!(args.nominals, vec![2.0]);
        assert_eq!(args.floor_rates, vec![0.01]);
    }

    #[test]
    fn relinked_curve_moves_the_reference_date() {
        let link = RelinkableHandle::new(FlatForward::new(date(2025, 1, 2), 0.03, Actual360)
            as Arc<dyn YieldTermStructure>);
        let cap = CapFloor::cap(schedule(), vec![1.0], vec![0.04], link.handle()).unwrap();
        let before = cap.arguments().unwrap().start_times[0];
        link.link_to(FlatForward::new(date(2025, 7, 2), 0.03, Actual360));
        let after = cap.arguments().unwrap().start_times[0];
        assert!(after < before);
    }

    #[test]
    fn expiry_follows_evaluation_date() {
        let old = vec![date(2020, 1, 2), date(2020, 7, 2)];
        let cap = CapFloor::cap(old, vec![1.0], vec![0.04], curve(date(2019, 1, 2))).unwrap();
        assert!(!cap.is_expired());
        let _guard = ScopedEvaluationDate::new(date(2021, 1, 4).serial());
        assert!(cap.is_expired());
        assert_eq!(cap.value(&NominalSum).unwrap(), 0.0);
    }

    #[test]
    fn value_goes_through_the_engine() {
        let collar = CapFloor::new(
            CapFloorType::Collar,
            schedule(),
            vec![100.0, 50.0],
            vec![0.05],
            vec![0.01],
            curve(date(2025, 1, 2)),
        )
        .unwrap();
        assert_eq!(collar.value(&NominalSum).unwrap(), 150.0);
        assert_eq!(collar.maturity_date(), Some(date(2027, 1, 2)));
    }

    #[test]
    fn invalid_terms_are_rejected() {
        let ts = curve(date(2025, 1, 2));
        assert!(CapFloor::cap(vec![date(2026, 1, 2)], vec![1.0], vec![0.04], ts.clone()).is_err());
        assert!(CapFloor::cap(schedule(), vec![1.0], Vec::new(), ts.clone()).is_err());
        assert!(CapFloor::cap(schedule(), vec![1.0; 3], vec![0.04], ts.clone()).is_err());
        assert!(CapFloor::cap(schedule(), vec![1.0], vec![0.04], Handle::empty())
            .unwrap()
            .arguments()
            .is_err());

        let args = CapFloorArguments {
            cap_floor_type: CapFloorType::Floor,
            start_times: vec![1.0],
            end_times: vec![1.5],
            accrual_times: vec![0.5],
            cap_rates: Vec::new(),
            floor_rates: Vec::new(),
            nominals: vec![1.0],
        };
        assert!(args.validate().unwrap_err().is_precondition());
    }
}
