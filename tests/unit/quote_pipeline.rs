use chrono::NaiveDate;
use implied_vol::prelude::*;

const CHAINS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/option_chains.json");
const RATE: f64 = 0.045;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

fn source() -> JsonQuoteSource {
    JsonQuoteSource::open(CHAINS).expect("sample chains load")
}

#[test]
fn test_sample_file_lists_symbols_and_expirations() {
    let source = source();
    assert_eq!(source.symbols(), vec!["QQQ".to_string(), "SPY".to_string()]);
    assert_eq!(source.underlying_price("spy").unwrap(), 585.0);

    let expirations = source.expirations("SPY").unwrap();
    assert_eq!(expirations.len(), 5);
    assert!(expirations.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_single_quote_inversion() {
    let source = source();
    let expiration = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
    let quotes = source
        .market_quotes("SPY", expiration, as_of(), RATE, PriceSource::MidPrice)
        .unwrap();
    assert_eq!(quotes.len(), 6);

    let atm = quotes.iter().find(|q| q.strike == 590.0).unwrap();
    let estimate = solve_iv(atm, &SolverConfig::default()).unwrap();
    assert!(estimate.value > 0.15 && estimate.value < 0.18, "{estimate:?}");
}

#[test]
fn test_surface_from_source() {
    let surface = VolatilitySurface::from_source(
        &source(),
        "SPY",
        as_of(),
        RATE,
        PriceSource::MidPrice,
        &SurfaceConfig::default(),
    )
    .unwrap();

    // Expired slice and the unpriced 700 strike are dropped.
    assert_eq!(surface.expiries().len(), 4);
    assert_eq!(surface.strikes(), &[560.0, 570.0, 580.0, 590.0, 600.0, 610.0]);
    assert_eq!(surface.solved_count(), 24);
    assert_eq!(surface.failed_count(), 0);

    for row in surface.volatilities() {
        for vol in row {
            let vol = vol.unwrap();
            assert!(vol > 0.15 && vol < 0.18, "vol = {vol}");
        }
    }

    let table = render_table(&surface);
    assert_eq!(table.lines().count(), 5);

    let package =
        SurfaceSnapshotPackage::new(SurfaceSnapshot::from_surface("SPY", &surface)).unwrap();
    let restored = SurfaceSnapshotPackage::from_json(&package.to_json().unwrap())
        .unwrap()
        .into_snapshot()
        .unwrap();
    assert_eq!(restored.volatilities, surface.volatilities());
}

#[test]
fn test_unknown_expiration_selection() {
    let source = source();
    let wrong = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let result = source.market_quotes("SPY", wrong, as_of(), RATE, PriceSource::MidPrice);
    assert!(matches!(result, Err(QuoteError::UnknownExpiration { .. })));
}

#[test]
fn test_fixed_price_grid_reports_unreachable_cells() {
    // Every cell priced at 5, as a quick what-if grid.
    let spot = 585.0;
    let surface = VolatilitySurface::build(
        &[500.0, 585.0, 650.0],
        &[0.1, 0.5],
        |strike, time| Some(MarketQuote::new(spot, strike, time, RATE, 5.0)),
        &SurfaceConfig::default(),
    );

    // Deep ITM strike is worth far more than 5 at any volatility.
    assert!(surface.volatility_at(500.0, 0.1).is_none());
    assert!(surface.volatility_at(585.0, 0.1).is_some());
    assert!(surface.failed_count() >= 2);
}
