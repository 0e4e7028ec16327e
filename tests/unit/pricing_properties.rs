use implied_vol::prelude::*;

const CASES: [(f64, f64, f64, f64); 6] = [
    (100.0, 100.0, 1.0, 0.05),
    (100.0, 90.0, 0.25, 0.02),
    (100.0, 130.0, 2.0, 0.0),
    (50.0, 55.0, 0.1, -0.01),
    (450.0, 440.0, 30.0 / 365.0, 0.045),
    (10.0, 10.0, 1.0, 0.08),
];

fn log_spaced(low: f64, high: f64, n: usize) -> Vec<f64> {
    let step = (high / low).ln() / (n - 1) as f64;
    (0..n).map(|i| low * (step * i as f64).exp()).collect()
}

#[test]
fn test_price_strictly_increasing_in_volatility() {
    let vols = log_spaced(0.05, 10.0, 200);
    for (spot, strike, time, rate) in CASES {
        let quote = MarketQuote::new(spot, strike, time, rate, 0.0);
        let prices: Vec<f64> = vols
            .iter()
            .map(|&vol| BlackScholes::call_price(&quote, vol))
            .collect();

        for (i, pair) in prices.windows(2).enumerate() {
            assert!(
                pair[1] > pair[0],
                "not increasing for {quote:?} between σ={} and σ={}: {} -> {}",
                vols[i],
                vols[i + 1],
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_price_within_model_bounds() {
    let vols = log_spaced(1e-5, 10.0, 50);
    for (spot, strike, time, rate) in CASES {
        let quote = MarketQuote::new(spot, strike, time, rate, 0.0);
        for &vol in &vols {
            let price = BlackScholes::call_price(&quote, vol);
            assert!(price >= quote.intrinsic_floor() - 1e-9, "{quote:?} σ={vol}");
            assert!(price <= quote.price_ceiling() + 1e-9, "{quote:?} σ={vol}");
        }
    }
}

#[test]
fn test_zero_volatility_limit() {
    for (spot, strike, time, rate) in CASES {
        let quote = MarketQuote::new(spot, strike, time, rate, 0.0);
        let price = BlackScholes::call_price(&quote, 1e-8);
        assert!(
            (price - quote.intrinsic_floor()).abs() < 1e-6,
            "{quote:?}: {price} vs floor {}",
            quote.intrinsic_floor()
        );
    }
}

#[test]
fn test_below_floor_has_no_root() {
    let config = SolverConfig::default();
    for (spot, strike, time, rate) in CASES {
        let quote = MarketQuote::new(spot, strike, time, rate, 0.0);
        let floor = quote.intrinsic_floor();
        if floor <= 0.01 {
            continue;
        }
        let quote = quote.with_observed_price(floor * 0.9);
        assert!(!quote.is_price_attainable());
        let result = solve_iv(&quote, &config);
        assert!(
            matches!(result, Err(IVError::NoRootInBracket { .. })),
            "{quote:?}: {result:?}"
        );
    }
}

#[test]
fn test_above_spot_has_no_root() {
    let config = SolverConfig::default();
    for (spot, strike, time, rate) in CASES {
        let quote = MarketQuote::new(spot, strike, time, rate, spot * 1.01);
        assert!(!quote.is_price_attainable());
        let result = solve_iv(&quote, &config);
        assert!(
            matches!(result, Err(IVError::NoRootInBracket { .. })),
            "{quote:?}: {result:?}"
        );
    }
}

#[test]
fn test_non_positive_time_rejected() {
    let config = SolverConfig::default();
    for time in [0.0, -0.0, -1.0, f64::NEG_INFINITY] {
        let quote = MarketQuote::new(100.0, 100.0, time, 0.05, 5.0);
        assert!(matches!(
            solve_iv(&quote, &config),
            Err(IVError::InvalidQuote { .. })
        ));
    }
}

#[test]
fn test_smallest_positive_time_does_not_crash_solver() {
    let config = SolverConfig::default();
    for time in [f64::MIN_POSITIVE, f64::from_bits(1)] {
        let quote = MarketQuote::new(100.0, 100.0, time, 0.05, 5.0);
        // Price range collapses to a point; the outcome is a reported error.
        match solve_iv(&quote, &config) {
            Err(IVError::NoRootInBracket { .. }) | Err(IVError::DidNotConverge { .. }) => {}
            other => panic!("unexpected outcome for T={time:e}: {other:?}"),
        }
    }
}
