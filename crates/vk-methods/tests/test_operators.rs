//! Property tests for the finite-difference operators.

use proptest::prelude::*;
use vk_methods::{DMinus, DPlusDMinus, DZero, TridiagonalOperator};

proptest! {
    #[test]
    fn dminus_annihilates_constants(n in 3usize..64, h in 1e-3f64..10.0, c in -1e3f64..1e3) {
        let d = DMinus::new(n, h).unwrap();
        for v in d.apply(&vec![c; n]).unwrap() {
            prop_assert!(v.abs() <= 1e-9 * c.abs().max(1.0) / h);
        }
    }

    #[test]
    fn dminus_differentiates_the_grid(n in 3usize..64, h in 1e-2f64..10.0) {
        let d = DMinus::new(n, h).unwrap();
        let grid: Vec<f64> = (0..n).map(|i| i as f64 * h).collect();
        for v in d.apply(&grid).unwrap() {
            prop_assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn operators_are_linear(
        n in 3usize..32,
        h in 1e-2f64..1.0,
        a in -5.0f64..5.0,
        seed in proptest::collection::vec(-1.0f64..1.0, 64),
    ) {
        let op = DZero::new(n, h).unwrap();
        let x = &seed[..n];
        let y = &seed[32..32 + n];
        let combined: Vec<f64> = x.iter().zip(y).map(|(p, q)| a * p + q).collect();
        let lhs = op.apply(&combined).unwrap();
        let ax = op.apply(x).unwrap();
        let ay = op.apply(y).unwrap();
        for i in 0..n {
            prop_assert!((lhs[i] - (a * ax[i] + ay[i])).abs() < 1e-8 / h);
        }
    }

    #[test]
    fn implicit_step_roundtrips(n in 3usize..64, dt in 1e-4f64..1e-1) {
        let h = 1.0 / n as f64;
        let l = DPlusDMinus::new(n, h).unwrap().into_operator();
        let a = TridiagonalOperator::identity(n).unwrap().try_sub(&(l * dt * h * h)).unwrap();
        let x: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();
        let rhs = a.apply(&x).unwrap();
        let solved = a.solve_for(&rhs).unwrap();
        for i in 0..n {
            prop_assert!((solved[i] - x[i]).abs() < 1e-10);
        }
    }
}
