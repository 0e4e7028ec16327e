//! Builds an implied volatility surface for one symbol from an option chain
//! file, prints it as a table and writes a checksummed JSON snapshot.
//!
//! # Run
//! ```bash
//! cargo run --bin volatility_surface -- [SYMBOL] [AS_OF] [CHAIN_FILE] [OUTPUT]
//! ```
//!
//! Defaults: `SPY`, `2025-01-02`, `demos/data/option_chains.json` and
//! `target/volatility_surface.json`.

use chrono::NaiveDate;
use implied_vol::prelude::*;
use tracing::{info, warn};

const DEFAULT_CHAINS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/option_chains.json");
const DEFAULT_OUTPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../target/volatility_surface.json");
const SAMPLE_AS_OF: &str = "2025-01-02";
const RISK_FREE_RATE: f64 = 0.045;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "SPY".to_string()).to_uppercase();
    let as_of = NaiveDate::parse_from_str(
        &args.next().unwrap_or_else(|| SAMPLE_AS_OF.to_string()),
        "%Y-%m-%d",
    )?;
    let path = args.next().unwrap_or_else(|| DEFAULT_CHAINS.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let source = JsonQuoteSource::open(&path)?;
    info!(
        "Building surface for {} as of {} (r = {:.2}%)",
        symbol,
        as_of,
        RISK_FREE_RATE * 100.0
    );

    let start = std::time::Instant::now();
    let surface = VolatilitySurface::from_source(
        &source,
        &symbol,
        as_of,
        RISK_FREE_RATE,
        PriceSource::MidPrice,
        &SurfaceConfig::default(),
    )?;
    info!(
        "Solved {} of {} cells in {:?}",
        surface.solved_count(),
        surface.strikes().len() * surface.expiries().len(),
        start.elapsed()
    );

    for row in surface.rows() {
        for cell in row {
            if let CellOutcome::Failed { reason } = &cell.outcome {
                warn!(
                    "strike {:.2}, T {:.4}: {}",
                    cell.strike, cell.time_to_expiry, reason
                );
            }
        }
    }

    println!("{}", render_table(&surface));

    let package = SurfaceSnapshotPackage::new(SurfaceSnapshot::from_surface(&symbol, &surface))?;
    if let Some(parent) = std::path::Path::new(&output).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, package.to_json()?)?;
    info!("Snapshot written to {} (checksum {})", output, package.checksum);

    Ok(())
}
