//! Volatility surface grid built from independent solver calls.

use crate::implied_volatility::{IVError, MarketQuote, SolverConfig, VolatilityEstimate, solve_iv};
use crate::quotes::{PriceSource, QuoteError, QuoteSource, time_to_expiration};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

/// Configuration for surface construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Solver settings applied to every cell.
    pub solver: SolverConfig,
    /// Solve cells on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            parallel: true,
        }
    }
}

impl SurfaceConfig {
    /// Creates a new surface configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Enables or disables parallel solving.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcome of one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellOutcome {
    /// The solver converged.
    Solved(VolatilityEstimate),
    /// The solver reported an error.
    Failed {
        /// Rendered solver error.
        reason: String,
    },
    /// No quote exists for this (strike, expiry) pair.
    Missing,
}

impl CellOutcome {
    fn from_result(result: Result<VolatilityEstimate, IVError>) -> Self {
        match result {
            Ok(estimate) => CellOutcome::Solved(estimate),
            Err(error) => CellOutcome::Failed {
                reason: error.to_string(),
            },
        }
    }

    /// Solved volatility, if any.
    #[must_use]
    pub fn volatility(&self) -> Option<f64> {
        match self {
            CellOutcome::Solved(estimate) => Some(estimate.value),
            _ => None,
        }
    }
}

/// One (strike, expiry) point of the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCell {
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Observed price that was inverted, when a quote existed.
    pub observed_price: Option<f64>,
    /// Solver outcome.
    pub outcome: CellOutcome,
}

/// Implied volatilities indexed by expiry (rows) and strike (columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySurface {
    strikes: Vec<f64>,
    expiries: Vec<f64>,
    cells: Vec<Vec<SurfaceCell>>,
}

impl VolatilitySurface {
    /// Builds a surface over the given axes.
    ///
    /// `quote_at(strike, time_to_expiry)` supplies the quote for each cell or
    /// `None` when nothing is quoted there. Every cell is solved
    /// independently; a failing cell never affects its neighbours.
    ///
    /// Axes are sorted ascending and deduplicated.
    pub fn build<F>(strikes: &[f64], expiries: &[f64], quote_at: F, config: &SurfaceConfig) -> Self
    where
        F: Fn(f64, f64) -> Option<MarketQuote> + Sync,
    {
        let strikes = sorted_axis(strikes);
        let expiries = sorted_axis(expiries);

        let points: Vec<(f64, f64)> = expiries
            .iter()
            .flat_map(|&t| strikes.iter().map(move |&k| (k, t)))
            .collect();

        let solve = |&(strike, time_to_expiry): &(f64, f64)| -> SurfaceCell {
            let quote = quote_at(strike, time_to_expiry);
            let outcome = match &quote {
                Some(quote) => CellOutcome::from_result(solve_iv(quote, &config.solver)),
                None => CellOutcome::Missing,
            };
            trace!("cell K={} T={:.4}: {:?}", strike, time_to_expiry, outcome);
            SurfaceCell {
                strike,
                time_to_expiry,
                observed_price: quote.map(|q| q.observed_price),
                outcome,
            }
        };

        let flat: Vec<SurfaceCell> = if config.parallel {
            points.par_iter().map(solve).collect()
        } else {
            points.iter().map(solve).collect()
        };

        let width = strikes.len().max(1);
        let cells: Vec<Vec<SurfaceCell>> = flat.chunks(width).map(<[SurfaceCell]>::to_vec).collect();

        let surface = Self {
            strikes,
            expiries,
            cells,
        };
        info!(
            "Built volatility surface: {} expiries x {} strikes, {} solved, {} failed",
            surface.expiries.len(),
            surface.strikes.len(),
            surface.solved_count(),
            surface.failed_count()
        );
        surface
    }

    /// Builds a surface from a flat list of quotes.
    ///
    /// The axes are the distinct strikes and expiries present in `quotes`;
    /// pairs without a quote become [`CellOutcome::Missing`]. When several
    /// quotes share a pair, the last one wins.
    pub fn from_quotes(quotes: &[MarketQuote], config: &SurfaceConfig) -> Self {
        let strikes: Vec<f64> = quotes.iter().map(|q| q.strike).collect();
        let expiries: Vec<f64> = quotes.iter().map(|q| q.time_to_expiry).collect();
        let by_point: HashMap<(u64, u64), MarketQuote> = quotes
            .iter()
            .map(|q| ((q.strike.to_bits(), q.time_to_expiry.to_bits()), *q))
            .collect();

        Self::build(
            &strikes,
            &expiries,
            |strike, time| by_point.get(&(strike.to_bits(), time.to_bits())).copied(),
            config,
        )
    }

    /// Builds a surface from every unexpired expiration a source lists for `symbol`.
    ///
    /// Expirations on or before `as_of` are skipped.
    pub fn from_source<S>(
        source: &S,
        symbol: &str,
        as_of: NaiveDate,
        risk_free_rate: f64,
        price_source: PriceSource,
        config: &SurfaceConfig,
    ) -> Result<Self, QuoteError>
    where
        S: QuoteSource + ?Sized,
    {
        let mut quotes = Vec::new();
        for expiration in source.expirations(symbol)? {
            if let Err(e) = time_to_expiration(expiration, as_of) {
                warn!("{}: skipping expiration: {}", symbol, e);
                continue;
            }
            quotes.extend(source.market_quotes(
                symbol,
                expiration,
                as_of,
                risk_free_rate,
                price_source,
            )?);
        }
        debug!("{}: {} quotes across expirations", symbol, quotes.len());
        Ok(Self::from_quotes(&quotes, config))
    }

    /// Strike axis, ascending.
    #[must_use]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Expiry axis in years, ascending.
    #[must_use]
    pub fn expiries(&self) -> &[f64] {
        &self.expiries
    }

    /// Cell at (expiry row, strike column).
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&SurfaceCell> {
        self.cells.get(row)?.get(column)
    }

    /// Rows of cells, one per expiry.
    #[must_use]
    pub fn rows(&self) -> &[Vec<SurfaceCell>] {
        &self.cells
    }

    /// Solved volatility at an exact axis point.
    #[must_use]
    pub fn volatility_at(&self, strike: f64, time_to_expiry: f64) -> Option<f64> {
        let column = self.strikes.iter().position(|&k| k == strike)?;
        let row = self.expiries.iter().position(|&t| t == time_to_expiry)?;
        self.cell(row, column)?.outcome.volatility()
    }

    /// Volatility matrix with `None` for unsolved cells.
    #[must_use]
    pub fn volatilities(&self) -> Vec<Vec<Option<f64>>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.outcome.volatility()).collect())
            .collect()
    }

    /// Number of converged cells.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CellOutcome::Solved(_)))
    }

    /// Number of cells whose solve failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CellOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&CellOutcome) -> bool) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| predicate(&cell.outcome))
            .count()
    }
}

fn sorted_axis(values: &[f64]) -> Vec<f64> {
    let mut axis = values.to_vec();
    axis.sort_by(f64::total_cmp);
    axis.dedup();
    axis
}
