//! Structural and property-based checks on lattice pricing runs.

use approx::assert_relative_eq;
use pricer_models::instruments::{ExerciseStyle, PayoffType};
use pricer_pricing::lattice::{convergence, price, LatticeConfig, ModelParams, PriceResult};
use proptest::prelude::*;

fn params(
    payoff: PayoffType,
    exercise: ExerciseStyle,
    rate: f64,
    dividend: f64,
    volatility: f64,
    steps: usize,
) -> ModelParams {
    ModelParams::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(rate)
        .dividend(dividend)
        .volatility(volatility)
        .maturity(1.0)
        .steps(steps)
        .payoff(payoff)
        .exercise(exercise)
        .build()
        .unwrap()
}

fn run(p: &ModelParams) -> PriceResult {
    price(p, &LatticeConfig::default()).unwrap()
}

// ============================================================================
// Lattice shape
// ============================================================================

#[test]
fn test_spot_rows_strictly_increasing() {
    let result = run(&params(
        PayoffType::Put,
        ExerciseStyle::American,
        0.03,
        0.0,
        0.2,
        300,
    ));
    let lattice = result.spot_lattice();
    for i in 0..=300 {
        let row = lattice.row(i);
        assert_eq!(row.len(), i + 1);
        for j in 0..i {
            assert!(row[j] < row[j + 1], "S({},{}) >= S({},{})", i, j, i, j + 1);
        }
    }
}

#[test]
fn test_terminal_flags_never_set() {
    let result = run(&params(
        PayoffType::Put,
        ExerciseStyle::American,
        0.05,
        0.0,
        0.3,
        100,
    ));
    assert!(result.exercise_matrix().row(100).iter().all(|&f| !f));
}

// ============================================================================
// Exercise boundary
// ============================================================================

#[test]
fn test_put_boundary_exists_with_high_volatility() {
    let result = run(&params(
        PayoffType::Put,
        ExerciseStyle::American,
        0.05,
        0.0,
        0.4,
        400,
    ));
    let boundary = result.boundary();
    assert!(!boundary.is_empty());
    assert!(boundary.iter().all(|(i, s)| i < 400 && s > 0.0));

    // the put boundary rises toward the strike as expiry approaches
    let (_, first) = boundary.iter().next().unwrap();
    let (_, last) = boundary.iter().last().unwrap();
    assert!(last > first);
}

#[test]
fn test_put_exercised_nodes_are_in_the_money() {
    let result = run(&params(
        PayoffType::Put,
        ExerciseStyle::American,
        0.05,
        0.0,
        0.3,
        150,
    ));
    let lattice = result.spot_lattice();
    for i in 0..150 {
        for (j, &flag) in result.exercise_matrix().row(i).iter().enumerate() {
            if flag {
                assert!(lattice.spot(i, j) < 100.0);
            }
        }
    }
}

#[test]
fn test_call_boundary_appears_with_high_dividend_yield() {
    let result = run(&params(
        PayoffType::Call,
        ExerciseStyle::American,
        0.03,
        0.10,
        0.2,
        200,
    ));
    assert!(!result.boundary().is_empty());

    let lattice = result.spot_lattice();
    for i in 0..200 {
        for (j, &flag) in result.exercise_matrix().row(i).iter().enumerate() {
            if flag {
                assert!(lattice.spot(i, j) > 100.0);
            }
        }
    }

    let european = run(&params(
        PayoffType::Call,
        ExerciseStyle::European,
        0.03,
        0.10,
        0.2,
        200,
    ));
    assert!(result.price() > european.price());
}

#[test]
fn test_european_results_carry_no_decisions() {
    for payoff in [PayoffType::Call, PayoffType::Put] {
        let result = run(&params(payoff, ExerciseStyle::European, 0.05, 0.10, 0.3, 120));
        assert!(result.boundary().is_empty());
        assert_eq!(result.exercised_nodes(), 0);
    }
}

// ============================================================================
// Parallel evaluation
// ============================================================================

#[test]
fn test_parallel_induction_matches_sequential() {
    let p = params(PayoffType::Put, ExerciseStyle::American, 0.03, 0.0, 0.2, 400);
    let sequential = price(&p, &LatticeConfig::default()).unwrap();
    let parallel = price(
        &p,
        &LatticeConfig::builder().parallel_threshold(16).build().unwrap(),
    )
    .unwrap();

    assert_eq!(sequential.price(), parallel.price());
    assert_eq!(sequential.boundary(), parallel.boundary());
    assert_eq!(sequential, parallel);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_american_put_settles_as_steps_increase() {
    let p = params(PayoffType::Put, ExerciseStyle::American, 0.03, 0.0, 0.2, 1);
    let reference = run(&p.with_steps(2000)).price();

    let points = convergence(&p, &[50, 200, 800], &LatticeConfig::default()).unwrap();
    let errors: Vec<f64> = points.iter().map(|pt| (pt.price - reference).abs()).collect();

    assert!(errors[0] < 0.1, "N=50 error {:.6}", errors[0]);
    assert!(errors[1] < 0.03, "N=200 error {:.6}", errors[1]);
    assert!(errors[2] < 0.01, "N=800 error {:.6}", errors[2]);
}

fn sweep_prices(p: &ModelParams, steps: &[usize]) -> Vec<f64> {
    convergence(p, steps, &LatticeConfig::default())
        .unwrap()
        .iter()
        .map(|pt| pt.price)
        .collect()
}

fn gaps(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] - w[0]).collect()
}

#[test]
fn test_american_put_odd_steps_decrease_toward_limit() {
    let p = params(PayoffType::Put, ExerciseStyle::American, 0.03, 0.0, 0.2, 1);
    let odd = sweep_prices(&p, &[51, 101, 201, 401]);
    let even = sweep_prices(&p, &[50, 100, 200, 400]);

    let odd_gaps = gaps(&odd);
    for (k, gap) in odd_gaps.iter().enumerate() {
        assert!(*gap <= 1e-12, "odd sweep rose at index {}: {:?}", k, odd);
    }
    for w in odd_gaps.windows(2) {
        assert!(w[1].abs() < w[0].abs(), "odd gaps not shrinking: {:?}", odd_gaps);
    }

    // even step counts approach the same limit from below
    let even_gaps = gaps(&even);
    for w in even_gaps.windows(2) {
        assert!(w[1].abs() < w[0].abs(), "even gaps not shrinking: {:?}", even_gaps);
    }
    for (o, e) in odd.iter().zip(&even) {
        assert!(o > e, "odd price {:.6} not above even price {:.6}", o, e);
    }
}

// ============================================================================
// Serialisation
// ============================================================================

#[test]
fn test_price_result_json_preserves_result() {
    let result = run(&params(
        PayoffType::Put,
        ExerciseStyle::American,
        0.03,
        0.0,
        0.2,
        20,
    ));
    let json = result.to_json().unwrap();
    assert!(json.contains("\"price\""));

    let restored: PriceResult = serde_json::from_str(&json).unwrap();
    assert_relative_eq!(restored.price(), result.price(), epsilon = 1e-12);
    assert_eq!(restored.boundary().len(), result.boundary().len());
}

// ============================================================================
// Properties
// ============================================================================

fn payoff_strategy() -> impl Strategy<Value = PayoffType> {
    prop_oneof![Just(PayoffType::Call), Just(PayoffType::Put)]
}

fn exercise_strategy() -> impl Strategy<Value = ExerciseStyle> {
    prop_oneof![Just(ExerciseStyle::European), Just(ExerciseStyle::American)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_price_non_negative(
        spot in 50.0_f64..150.0,
        strike in 50.0_f64..150.0,
        rate in 0.0_f64..0.1,
        dividend in 0.0_f64..0.1,
        volatility in 0.1_f64..0.8,
        maturity in 0.1_f64..2.0,
        steps in 5_usize..120,
        payoff in payoff_strategy(),
        exercise in exercise_strategy(),
    ) {
        let p = ModelParams::new(
            spot, strike, rate, dividend, volatility, maturity, steps, payoff, exercise,
        ).unwrap();
        let result = price(&p, &LatticeConfig::default()).unwrap();
        prop_assert!(result.price() >= 0.0);
        prop_assert!(result.price().is_finite());
    }

    #[test]
    fn prop_american_dominates_european_and_intrinsic(
        spot in 50.0_f64..150.0,
        strike in 50.0_f64..150.0,
        rate in 0.0_f64..0.1,
        dividend in 0.0_f64..0.1,
        volatility in 0.1_f64..0.8,
        steps in 5_usize..120,
        payoff in payoff_strategy(),
    ) {
        let american = ModelParams::new(
            spot, strike, rate, dividend, volatility, 1.0, steps, payoff,
            ExerciseStyle::American,
        ).unwrap();
        let a = price(&american, &LatticeConfig::default()).unwrap().price();
        let e = price(
            &american.with_exercise(ExerciseStyle::European),
            &LatticeConfig::default(),
        ).unwrap().price();

        prop_assert!(a >= e - 1e-12);
        prop_assert!(a >= payoff.intrinsic(spot, strike) - 1e-12);
    }

    #[test]
    fn prop_price_monotone_in_strike(
        strike in 60.0_f64..140.0,
        bump in 0.5_f64..10.0,
        steps in 5_usize..100,
        payoff in payoff_strategy(),
        exercise in exercise_strategy(),
    ) {
        let low = ModelParams::new(
            100.0, strike, 0.03, 0.01, 0.25, 1.0, steps, payoff, exercise,
        ).unwrap();
        let high = ModelParams::new(
            100.0, strike + bump, 0.03, 0.01, 0.25, 1.0, steps, payoff, exercise,
        ).unwrap();
        let v_low = price(&low, &LatticeConfig::default()).unwrap().price();
        let v_high = price(&high, &LatticeConfig::default()).unwrap().price();

        match payoff {
            PayoffType::Call => prop_assert!(v_high <= v_low + 1e-12),
            PayoffType::Put => prop_assert!(v_high >= v_low - 1e-12),
        }
    }
}
