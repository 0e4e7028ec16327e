use implied_vol::prelude::*;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

#[test]
fn test_reference_scenario() {
    let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.05, 0.0);
    let price = BlackScholes::call_price(&quote, 0.2);
    assert!((price - 10.4506).abs() < 1e-4, "price = {price}");

    let estimate = solve_iv_in_bracket(
        &quote.with_observed_price(price),
        1e-5,
        10.0,
        &SolverConfig::default(),
    )
    .unwrap();
    assert!((estimate.value - 0.2).abs() < TOLERANCE);
    assert!(estimate.converged);
}

#[test]
fn test_unreachable_price_scenario() {
    let quote = MarketQuote::new(100.0, 150.0, 0.01, 0.05, 60.0);
    let result = solve_iv(&quote, &SolverConfig::default());
    assert!(matches!(result, Err(IVError::NoRootInBracket { .. })));

    // Same inputs, same failure.
    assert_eq!(result, solve_iv(&quote, &SolverConfig::default()));
}

#[test]
fn test_widened_bracket_still_converges() {
    let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.0, 0.0);
    let price = BlackScholes::call_price(&quote, 12.0);
    let quote = quote.with_observed_price(price);

    assert!(matches!(
        solve_iv(&quote, &SolverConfig::default()),
        Err(IVError::NoRootInBracket { .. })
    ));

    let config = SolverConfig::new().with_bracket(1e-5, 20.0);
    let estimate = solve_iv(&quote, &config).unwrap();
    assert!((estimate.value - 12.0).abs() < 1e-4);
}

proptest! {
    #[test]
    fn prop_round_trip_recovers_volatility(
        spot in 50.0f64..150.0,
        moneyness in 0.8f64..1.25,
        time in 0.25f64..2.0,
        rate in -0.02f64..0.08,
        vol in 0.1f64..1.5,
    ) {
        let quote = MarketQuote::new(spot, spot * moneyness, time, rate, 0.0);
        let price = BlackScholes::call_price(&quote, vol);

        let estimate = solve_iv(&quote.with_observed_price(price), &SolverConfig::default()).unwrap();
        prop_assert!(estimate.converged);
        prop_assert!(
            (estimate.value - vol).abs() < TOLERANCE,
            "recovered {} for σ={}", estimate.value, vol
        );
    }

    #[test]
    fn prop_round_trip_high_volatility_short_expiry(
        spot in 50.0f64..150.0,
        moneyness in 0.8f64..1.25,
        time in 0.01f64..0.25,
        rate in -0.02f64..0.08,
        vol in 1.5f64..10.0,
    ) {
        let quote = MarketQuote::new(spot, spot * moneyness, time, rate, 0.0);
        let price = BlackScholes::call_price(&quote, vol);
        // At the model limits the price no longer identifies σ.
        prop_assume!(price > quote.intrinsic_floor() && price < quote.price_ceiling());

        let estimate = solve_iv(&quote.with_observed_price(price), &SolverConfig::default()).unwrap();
        prop_assert!(estimate.converged);
        prop_assert!(
            (estimate.value - vol).abs() < TOLERANCE,
            "recovered {} for σ={}, T={}", estimate.value, vol, time
        );
    }

    #[test]
    fn prop_solver_is_idempotent(
        spot in 50.0f64..150.0,
        strike in 50.0f64..150.0,
        time in 0.01f64..3.0,
        observed in 0.0f64..150.0,
    ) {
        let quote = MarketQuote::new(spot, strike, time, 0.03, observed);
        let config = SolverConfig::default();
        prop_assert_eq!(solve_iv(&quote, &config), solve_iv(&quote, &config));
    }
}
