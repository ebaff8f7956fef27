//! Cap/floor engine against instruments and models.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use std::sync::Arc;
use vk_core::{Handle, OptionType, RelinkableHandle};
use vk_instruments::{CapFloor, CapFloorArguments, CapFloorType, PricingEngine};
use vk_models::{AffineModel, HullWhite, Vasicek};
use vk_pricingengines::AnalyticCapFloorEngine;
use vk_termstructures::{FlatForward, YieldTermStructure};
use vk_time::{Actual365Fixed, Date};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn today() -> Date {
    date(2025, 1, 2)
}

fn arguments(cap_floor_type: CapFloorType, cap: f64, floor: f64, periods: usize) -> CapFloorArguments {
    let start_times: Vec<f64> = (0..periods).map(|i| 0.5 + 0.5 * i as f64).collect();
    CapFloorArguments {
        cap_floor_type,
        end_times: start_times.iter().map(|t| t + 0.5).collect(),
        start_times,
        accrual_times: vec![0.5; periods],
        cap_rates: vec![cap; periods],
        floor_rates: vec![floor; periods],
        nominals: vec![1_000_000.0; periods],
    }
}

#[test]
fn hull_white_cap_minus_floor_is_a_swap() {
    // cap(K) − floor(K) pays τ(L − K) each period: a forward-starting swap
    let curve: Arc<dyn YieldTermStructure> = FlatForward::new(today(), 0.04, Actual365Fixed);
    let model: Arc<dyn AffineModel> =
        Arc::new(HullWhite::new(Handle::new(curve), 0.05, 0.01).unwrap());
    let engine = AnalyticCapFloorEngine::new(model);

    let k = 0.035;
    let collar = engine
        .calculate(&arguments(CapFloorType::Collar, k, k, 4))
        .unwrap()
        .value;
    let swap: f64 = (0..4)
        .map(|i| {
            let (t, s) = (0.5 + 0.5 * i as f64, 1.0 + 0.5 * i as f64);
            1_000_000.0 * ((-0.04 * t).exp() - (1.0 + k * 0.5) * (-0.04 * s).exp())
        })
        .sum();
    assert_abs_diff_eq!(collar, swap, epsilon = 1e-6);
}

#[test]
fn instrument_reprices_after_relinking_the_curve() {
    let link = RelinkableHandle::new(
        FlatForward::new(today(), 0.03, Actual365Fixed) as Arc<dyn YieldTermStructure>
    );
    let model: Arc<dyn AffineModel> = Arc::new(HullWhite::new(link.handle(), 0.1, 0.01).unwrap());
    let engine = AnalyticCapFloorEngine::new(model);
    let cap = CapFloor::cap(
        vec![date(2026, 1, 2), date(2026, 7, 2), date(2027, 1, 2)],
        vec![100.0],
        vec![0.04],
        link.handle(),
    )
    .unwrap();

    let low = cap.value(&engine).unwrap();
    link.link_to(FlatForward::new(today(), 0.06, Actual365Fixed));
    let high = cap.value(&engine).unwrap();
    assert!(high > low, "{high} <= {low}");
}

#[test]
fn caplet_matches_direct_bond_option() {
    let vasicek = Vasicek::new(0.2, 0.05, 0.015, 0.045).unwrap();
    let engine = AnalyticCapFloorEngine::new(Arc::new(vasicek));
    let value = engine
        .calculate(&arguments(CapFloorType::Cap, 0.05, 0.0, 1))
        .unwrap()
        .value;
    let temp = 1.0 + 0.05 * 0.5;
    let put = vasicek
        .discount_bond_option(OptionType::Put, 1.0 / temp, 0.5, 1.0)
        .unwrap();
    assert_eq!(value, 1_000_000.0 * temp * put);
}

proptest! {
    #[test]
    fn collar_is_cap_minus_floor(
        cap in 0.0f64..0.1,
        floor in 0.0f64..0.1,
        periods in 1usize..8,
    ) {
        let engine = AnalyticCapFloorEngine::new(Arc::new(Vasicek::new(0.1, 0.05, 0.01, 0.04).unwrap()));
        let c = engine.calculate(&arguments(CapFloorType::Cap, cap, floor, periods)).unwrap().value;
        let f = engine.calculate(&arguments(CapFloorType::Floor, cap, floor, periods)).unwrap().value;
        let collar = engine.calculate(&arguments(CapFloorType::Collar, cap, floor, periods)).unwrap().value;
        prop_assert!((collar - (c - f)).abs() <= 1e-9 * (c.abs() + f.abs()).max(1.0));
        prop_assert!(c >= 0.0 && f >= 0.0);
    }
}
