//! Property-based tests for membership evaluation and the tip pipeline.

use fuzzy_tip::{Inputs, MembershipFunction, Pipeline, Stage};
use proptest::prelude::*;

/// Sorted breakpoints inside [-20, 20], duplicates allowed
fn breakpoints(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-20.0..20.0f64, n).prop_map(|mut points| {
        points.sort_by(|a, b| a.total_cmp(b));
        points
    })
}

fn membership_function() -> impl Strategy<Value = MembershipFunction> {
    prop_oneof![
        breakpoints(3).prop_map(|p| MembershipFunction::triangular(p[0], p[1], p[2]).unwrap()),
        breakpoints(4).prop_map(|p| MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap()),
    ]
}

fn rating() -> impl Strategy<Value = f64> {
    0.0..=10.0f64
}

proptest! {
    #[test]
    fn test_degree_is_bounded(function in membership_function(), x in -1e6..1e6f64) {
        let degree = function.degree(x);

        prop_assert!((0. ..=1.).contains(&degree), "{function:?} at {x} gave {degree}");
    }

    #[test]
    fn test_checked_functions_stay_bounded_at_any_magnitude(
        p in prop::collection::vec(prop::num::f64::NORMAL | prop::num::f64::ZERO, 4),
        x in prop::num::f64::NORMAL | prop::num::f64::ZERO
    ) {
        let mut p = p;

        p.sort_by(|a, b| a.total_cmp(b));

        // Spans that overflow are rejected up front
        if let Ok(function) = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]) {
            let degree = function.degree(x);

            prop_assert!((0. ..=1.).contains(&degree), "{function:?} at {x} gave {degree}");
        }
        if let Ok(function) = MembershipFunction::triangular(p[0], p[1], p[3]) {
            let degree = function.degree(x);

            prop_assert!((0. ..=1.).contains(&degree), "{function:?} at {x} gave {degree}");
        }
    }

    #[test]
    fn test_degree_is_zero_outside_support(function in membership_function(), offset in 1e-6..100.0f64) {
        let (lo, hi) = function.support();

        prop_assert_eq!(function.degree(lo - offset), 0.);
        prop_assert_eq!(function.degree(hi + offset), 0.);
    }

    #[test]
    fn test_degree_is_one_on_core(p in breakpoints(4), t in 0.0..=1.0f64) {
        let trap = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();
        let x = (p[1] + t * (p[2] - p[1])).clamp(p[1], p[2]);

        prop_assert_eq!(trap.degree(x), 1.);

        let tri = MembershipFunction::triangular(p[0], p[1], p[3]).unwrap();

        prop_assert_eq!(tri.degree(p[1]), 1.);
    }

    #[test]
    fn test_pipeline_covers_rating_range(
        atendimento in rating(),
        comida in rating(),
        estacionamento in rating(),
        acessibilidade in rating(),
        limpeza in rating()
    ) {
        let pipeline = Pipeline::new().unwrap();
        let tip = pipeline.evaluate(atendimento, comida, estacionamento, acessibilidade, limpeza).unwrap();

        prop_assert!((0. ..=15.).contains(&tip));
        // No hidden state between calls
        prop_assert_eq!(
            pipeline.evaluate(atendimento, comida, estacionamento, acessibilidade, limpeza).unwrap(),
            tip
        );
    }

    #[test]
    fn test_stage_outputs_stay_in_universe(atendimento in rating(), comida in rating()) {
        let pipeline = Pipeline::new().unwrap();
        let service = pipeline.stage(Stage::Service);
        let inputs = Inputs::new()
            .with("Atendimento", atendimento)
            .with("Comida", comida);
        let value = service.evaluate(&inputs).unwrap();

        prop_assert!(service.consequent().universe().contains(&value));
    }
}
