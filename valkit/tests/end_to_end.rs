//! Scenarios crossing crate boundaries.

use approx::assert_abs_diff_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use valkit::core::{Handle, Observable, Observer, OptionType, RelinkableHandle, SwapType};
use valkit::instruments::{CapFloor, CapFloorType, PricingEngine};
use valkit::marketmodels::{simulate_path, LmmCurveState, MultiStepSwap};
use valkit::methods::DMinus;
use valkit::models::{AffineModel, HullWhite, Vasicek};
use valkit::pricingengines::AnalyticCapFloorEngine;
use valkit::quotes::{Quote, SimpleQuote};
use valkit::termstructures::{FlatForward, YieldTermStructure, ZeroSpreadedTermStructure};
use valkit::time::{Actual365Fixed, Date};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[derive(Default)]
struct Counter(AtomicUsize);

impl Observer for Counter {
    fn update(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn quote_relink_reaches_a_spreaded_curve() {
    let today = date(2025, 1, 2);
    let rate = RelinkableHandle::new(Arc::new(SimpleQuote::new(0.03)) as Arc<dyn Quote>);
    let base: Arc<dyn YieldTermStructure> = FlatForward::with_quote(today, rate.handle(), Actual365Fixed);
    let spread: Arc<dyn Quote> = Arc::new(SimpleQuote::new(0.005));
    let curve = ZeroSpreadedTermStructure::new(Handle::new(base), Handle::new(spread)).unwrap();
    let counter = Arc::new(Counter::default());
    curve.register_observer(Arc::downgrade(&counter) as Weak<dyn Observer>);

    assert_abs_diff_eq!(curve.zero_yield(2.0, false).unwrap(), 0.035, epsilon = 1e-15);
    rate.link_to(Arc::new(SimpleQuote::new(0.04)));
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    assert_abs_diff_eq!(curve.zero_yield(2.0, false).unwrap(), 0.045, epsilon = 1e-15);
}

#[test]
fn cap_value_follows_the_quote() {
    let today = date(2025, 1, 2);
    let quote = Arc::new(SimpleQuote::new(0.03));
    let curve: Arc<dyn YieldTermStructure> = FlatForward::with_quote(
        today,
        Handle::new(Arc::clone(&quote) as Arc<dyn Quote>),
        Actual365Fixed,
    );
    let curve = Handle::new(curve);
    let model: Arc<dyn AffineModel> = Arc::new(HullWhite::new(curve.clone(), 0.1, 0.01).unwrap());
    let engine = AnalyticCapFloorEngine::new(model);
    let cap = CapFloor::cap(
        vec![date(2025, 7, 2), date(2026, 1, 2), date(2026, 7, 2), date(2027, 1, 2)],
        vec![1_000_000.0],
        vec![0.035],
        curve,
    )
    .unwrap();

    let before = cap.value(&engine).unwrap();
    quote.set_value(0.05);
    let after = cap.value(&engine).unwrap();
    assert!(after > before, "{after} <= {before}");
}

#[test]
fn floor_matches_the_reference_formula_exactly() {
    let model = Vasicek::new(0.1, 0.05, 0.012, 0.03).unwrap();
    let engine = AnalyticCapFloorEngine::new(Arc::new(model));
    let args = valkit::instruments::CapFloorArguments {
        cap_floor_type: CapFloorType::Floor,
        start_times: vec![1.0],
        end_times: vec![1.5],
        accrual_times: vec![0.5],
        cap_rates: Vec::new(),
        floor_rates: vec![0.02],
        nominals: vec![100.0],
    };
    let expected = 100.0
        * (1.0 + 0.02 * 0.5)
        * model
            .discount_bond_option(OptionType::Call, 1.0 / 1.01, 1.0, 1.5)
            .unwrap();
    assert_eq!(engine.calculate(&args).unwrap().value.to_bits(), expected.to_bits());
}

#[test]
fn swap_paths_are_reproducible() {
    let rate_times = vec![0.0, 0.5, 1.0, 1.5];
    let forwards = [0.03, 0.032, 0.034];
    let states: Vec<LmmCurveState> = (0..3)
        .map(|first| {
            let mut cs = LmmCurveState::new(rate_times.clone()).unwrap();
            cs.set_on_forward_rates(&forwards, first).unwrap();
            cs
        })
        .collect();
    let mut swap = MultiStepSwap::new(
        rate_times,
        vec![0.5; 3],
        vec![0.5; 3],
        vec![0.5, 1.0, 1.5],
        0.032,
        SwapType::Payer,
    )
    .unwrap()
    .with_nominal(1_000.0);

    let first = simulate_path(&mut swap, &states).unwrap();
    let second = simulate_path(&mut swap, &states).unwrap();
    assert_eq!(first, second);
    let net: f64 = first
        .iter()
        .flat_map(|step| step.flows(0).iter().map(|f| f.amount))
        .sum();
    assert_abs_diff_eq!(net, 1_000.0 * 0.5 * (0.03 + 0.034 - 2.0 * 0.032), epsilon = 1e-12);
}

#[test]
fn backward_difference_of_a_discount_grid() {
    let curve = FlatForward::new(date(2025, 1, 2), 0.05, Actual365Fixed);
    let h = 0.01;
    let grid: Vec<f64> = (0..50).map(|i| -curve.zero_yield(1.0, false).unwrap() * h * i as f64).collect();
    let slope = DMinus::new(grid.len(), h).unwrap().apply(&grid).unwrap();
    for s in slope {
        assert_abs_diff_eq!(s, -0.05, epsilon = 1e-12);
    }
}

#[test]
fn collar_uses_both_legs() {
    let curve: Arc<dyn YieldTermStructure> = FlatForward::new(date(2025, 1, 2), 0.04, Actual365Fixed);
    let curve = Handle::new(curve);
    let model: Arc<dyn AffineModel> = Arc::new(HullWhite::new(curve.clone(), 0.08, 0.012).unwrap());
    let engine = AnalyticCapFloorEngine::new(model);
    let schedule = vec![date(2026, 1, 2), date(2026, 7, 2), date(2027, 1, 2)];
    let make = |t| {
        CapFloor::new(t, schedule.clone(), vec![100.0], vec![0.05], vec![0.03], curve.clone())
            .unwrap()
            .value(&engine)
            .unwrap()
    };
    let cap = make(CapFloorType::Cap);
    let floor = make(CapFloorType::Floor);
    let collar = make(CapFloorType::Collar);
    assert_abs_diff_eq!(collar, cap - floor, epsilon = 1e-12);
}
