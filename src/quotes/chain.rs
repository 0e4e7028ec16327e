//! Option chain value types.

use super::error::QuoteError;
use crate::implied_volatility::MarketQuote;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day count basis used to turn calendar days into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Which observed price of a call quote feeds the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Midpoint of bid and ask: `(bid + ask) / 2`, falling back to the last
    /// traded price when either side is missing.
    #[default]
    MidPrice,
    /// Last traded price.
    LastTrade,
}

/// Market data for a single call contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallQuote {
    /// Contract strike price.
    pub strike: f64,
    /// Last traded price.
    pub last_price: f64,
    /// Best bid, if any.
    #[serde(default)]
    pub bid: Option<f64>,
    /// Best ask, if any.
    #[serde(default)]
    pub ask: Option<f64>,
}

impl CallQuote {
    /// Creates a quote with only a last traded price.
    #[must_use]
    pub fn new(strike: f64, last_price: f64) -> Self {
        Self {
            strike,
            last_price,
            bid: None,
            ask: None,
        }
    }

    /// Adds a bid/ask pair to the quote.
    #[must_use]
    pub fn with_bid_ask(mut self, bid: f64, ask: f64) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self
    }

    /// Bid/ask midpoint when both sides are positive and not crossed.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) if bid > 0.0 && ask >= bid => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Resolves the observed price for the given source.
    pub fn price(&self, source: PriceSource) -> Result<f64, QuoteError> {
        let last = (self.last_price > 0.0).then_some(self.last_price);
        let price = match source {
            PriceSource::MidPrice => self.mid_price().or(last),
            PriceSource::LastTrade => last,
        };
        price.ok_or(QuoteError::NoPriceAvailable {
            strike: self.strike,
        })
    }
}

/// All calls listed for one expiration date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationSlice {
    /// Contract expiration date.
    pub expiration: NaiveDate,
    /// Calls ordered as listed by the source.
    pub calls: Vec<CallQuote>,
}

/// Option chain for one underlying symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Ticker symbol of the underlying.
    pub symbol: String,
    /// Current underlying price.
    pub underlying_price: f64,
    /// Listed expirations.
    pub expirations: Vec<ExpirationSlice>,
}

impl OptionChain {
    /// Listed expiration dates in ascending order.
    #[must_use]
    pub fn expiration_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.expirations.iter().map(|s| s.expiration).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Calls listed for `expiration`.
    pub fn calls(&self, expiration: NaiveDate) -> Result<&[CallQuote], QuoteError> {
        self.expirations
            .iter()
            .find(|slice| slice.expiration == expiration)
            .map(|slice| slice.calls.as_slice())
            .ok_or_else(|| QuoteError::UnknownExpiration {
                symbol: self.symbol.clone(),
                expiration,
                available: self.expiration_dates(),
            })
    }
}

/// Year fraction between `as_of` and `expiration` on an actual/365 basis.
///
/// Expirations on or before `as_of` are rejected: a zero time to expiry
/// cannot be priced.
pub fn time_to_expiration(expiration: NaiveDate, as_of: NaiveDate) -> Result<f64, QuoteError> {
    let days = (expiration - as_of).num_days();
    if days <= 0 {
        return Err(QuoteError::ExpiredContract { expiration, as_of });
    }
    Ok(days as f64 / DAYS_PER_YEAR)
}

/// Builds the solver input for one call quote.
pub fn market_quote(
    underlying_price: f64,
    call: &CallQuote,
    time_to_expiry: f64,
    risk_free_rate: f64,
    source: PriceSource,
) -> Result<MarketQuote, QuoteError> {
    Ok(MarketQuote::new(
        underlying_price,
        call.strike,
        time_to_expiry,
        risk_free_rate,
        call.price(source)?,
    ))
}
