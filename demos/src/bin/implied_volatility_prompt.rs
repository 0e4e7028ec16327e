//! Interactive implied volatility calculator.
//!
//! Prompts for a ticker, an expiration date, the option price, the strike and
//! the risk-free rate, then solves for the implied volatility.
//!
//! # Run
//! ```bash
//! cargo run --bin implied_volatility_prompt -- [CHAIN_FILE] [AS_OF]
//! ```
//!
//! `CHAIN_FILE` defaults to `demos/data/option_chains.json` and `AS_OF`
//! (YYYY-MM-DD) to today.

use chrono::{Local, NaiveDate};
use implied_vol::prelude::*;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

const DEFAULT_CHAINS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/option_chains.json");
const SAMPLE_ROWS: usize = 5;

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_CHAINS.to_string());
    let as_of = match args.next() {
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")?,
        None => Local::now().date_naive(),
    };

    let source = JsonQuoteSource::open(&path)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let ticker = prompt(&mut lines, "Enter the ticker symbol (e.g., SPY, QQQ): ")?.to_uppercase();
    let spot = match source.underlying_price(&ticker) {
        Ok(spot) => spot,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };
    info!("Current price for {}: {:.2}", ticker, spot);

    let expirations = source.expirations(&ticker)?;
    let listed: Vec<String> = expirations.iter().map(ToString::to_string).collect();
    info!("Available expiration dates: {}", listed.join(", "));

    let selected = prompt(&mut lines, "Enter the expiration date (YYYY-MM-DD): ")?;
    let expiration = match NaiveDate::parse_from_str(&selected, "%Y-%m-%d") {
        Ok(date) if expirations.contains(&date) => date,
        _ => {
            warn!("Invalid expiration date. Please restart and select a listed date.");
            return Ok(());
        }
    };

    info!("Calls sample:");
    for call in source.calls(&ticker, expiration)?.iter().take(SAMPLE_ROWS) {
        info!(
            "  strike {:>8.2}  last {:>8.2}  bid {:>8}  ask {:>8}",
            call.strike,
            call.last_price,
            call.bid.map_or("-".to_string(), |b| format!("{b:.2}")),
            call.ask.map_or("-".to_string(), |a| format!("{a:.2}")),
        );
    }

    let option_price = prompt(&mut lines, "Enter the market price of the option: ")?;
    let strike = prompt(&mut lines, "Enter the strike price: ")?;
    let rate = prompt(&mut lines, "Enter the risk-free interest rate (e.g., 0.05 for 5%): ")?;
    let (Some(option_price), Some(strike), Some(rate)) = (
        parse_number(&option_price),
        parse_number(&strike),
        parse_number(&rate),
    ) else {
        warn!("Invalid input. Please enter numeric values.");
        return Ok(());
    };

    let time_to_expiry = match time_to_expiration(expiration, as_of) {
        Ok(t) => t,
        Err(e) => {
            warn!("{}. Please select a future expiration date.", e);
            return Ok(());
        }
    };
    info!("Time to expiration: {:.3} years", time_to_expiry);

    let quote = MarketQuote::new(spot, strike, time_to_expiry, rate, option_price);
    match solve_iv(&quote, &SolverConfig::default()) {
        Ok(estimate) => {
            info!("Implied Volatility: {:.2}%", estimate.value_percent());
            info!("  converged in {} iterations", estimate.iterations);
        }
        Err(e @ IVError::NoRootInBracket { .. }) => {
            warn!("Error calculating implied volatility: {}", e);
            if quote.is_price_attainable() {
                warn!("The price is attainable; try a wider volatility bracket.");
            } else {
                warn!(
                    "Attainable call prices lie strictly between {:.4} and {:.4}.",
                    quote.intrinsic_floor(),
                    quote.price_ceiling()
                );
            }
        }
        Err(e) => warn!("Error calculating implied volatility: {}", e),
    }

    Ok(())
}
