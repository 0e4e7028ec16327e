//! Quote sources: where underlying prices and option chains come from.

use super::chain::{CallQuote, OptionChain, PriceSource, market_quote, time_to_expiration};
use super::error::QuoteError;
use crate::implied_volatility::MarketQuote;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Supplier of market data for ticker symbols.
///
/// Symbols are matched case-insensitively.
pub trait QuoteSource {
    /// Current price of the underlying.
    fn underlying_price(&self, symbol: &str) -> Result<f64, QuoteError>;

    /// Listed expiration dates in ascending order.
    fn expirations(&self, symbol: &str) -> Result<Vec<NaiveDate>, QuoteError>;

    /// Calls listed for one expiration.
    fn calls(&self, symbol: &str, expiration: NaiveDate) -> Result<Vec<CallQuote>, QuoteError>;

    /// Converts every priced call of one expiration into solver input.
    ///
    /// Calls without a usable price are skipped.
    fn market_quotes(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        as_of: NaiveDate,
        risk_free_rate: f64,
        source: PriceSource,
    ) -> Result<Vec<MarketQuote>, QuoteError> {
        let time_to_expiry = time_to_expiration(expiration, as_of)?;
        let underlying_price = self.underlying_price(symbol)?;

        let quotes: Vec<MarketQuote> = self
            .calls(symbol, expiration)?
            .iter()
            .filter_map(|call| {
                match market_quote(underlying_price, call, time_to_expiry, risk_free_rate, source)
                {
                    Ok(quote) => Some(quote),
                    Err(e) => {
                        trace!("{}: skipping call: {}", symbol, e);
                        None
                    }
                }
            })
            .collect();

        debug!(
            "{} {}: {} priced calls, T = {:.4} years",
            symbol,
            expiration,
            quotes.len(),
            time_to_expiry
        );
        Ok(quotes)
    }
}

/// JSON document holding one or more option chains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainDocument {
    /// Chains, one per symbol.
    pub chains: Vec<OptionChain>,
}

/// In-memory quote source.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    chains: HashMap<String, OptionChain>,
}

impl StaticQuoteSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chain, replacing any previous chain for the same symbol.
    #[must_use]
    pub fn with_chain(mut self, chain: OptionChain) -> Self {
        self.insert(chain);
        self
    }

    /// Adds a chain, replacing any previous chain for the same symbol.
    pub fn insert(&mut self, chain: OptionChain) {
        self.chains.insert(chain.symbol.to_uppercase(), chain);
    }

    /// Known symbols in ascending order.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.chains.values().map(|c| c.symbol.clone()).collect();
        symbols.sort();
        symbols
    }

    /// Chain for a symbol.
    pub fn chain(&self, symbol: &str) -> Result<&OptionChain, QuoteError> {
        self.chains
            .get(&symbol.to_uppercase())
            .ok_or_else(|| QuoteError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }
}

impl From<ChainDocument> for StaticQuoteSource {
    fn from(document: ChainDocument) -> Self {
        document
            .chains
            .into_iter()
            .fold(Self::new(), |source, chain| source.with_chain(chain))
    }
}

impl QuoteSource for StaticQuoteSource {
    fn underlying_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        Ok(self.chain(symbol)?.underlying_price)
    }

    fn expirations(&self, symbol: &str) -> Result<Vec<NaiveDate>, QuoteError> {
        Ok(self.chain(symbol)?.expiration_dates())
    }

    fn calls(&self, symbol: &str, expiration: NaiveDate) -> Result<Vec<CallQuote>, QuoteError> {
        Ok(self.chain(symbol)?.calls(expiration)?.to_vec())
    }
}

/// Quote source backed by a [`ChainDocument`] JSON file.
#[derive(Debug, Clone)]
pub struct JsonQuoteSource {
    path: Option<PathBuf>,
    inner: StaticQuoteSource,
}

impl JsonQuoteSource {
    /// Loads chains from a JSON file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let path = path.as_ref().to_path_buf();
        let inner = Self::load(&path)?;
        Ok(Self {
            path: Some(path),
            inner,
        })
    }

    /// Parses chains from a JSON string.
    pub fn from_json(data: &str) -> Result<Self, QuoteError> {
        Ok(Self {
            path: None,
            inner: Self::parse(data)?,
        })
    }

    /// Re-reads the backing file. Sources built from a string are left unchanged.
    pub fn reload(&mut self) -> Result<(), QuoteError> {
        if let Some(path) = &self.path {
            self.inner = Self::load(path)?;
        }
        Ok(())
    }

    /// Known symbols in ascending order.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.inner.symbols()
    }

    fn load(path: &Path) -> Result<StaticQuoteSource, QuoteError> {
        let data = std::fs::read_to_string(path).map_err(|error| QuoteError::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;
        let source = Self::parse(&data)?;
        info!(
            "Loaded option chains for {:?} from {}",
            source.symbols(),
            path.display()
        );
        Ok(source)
    }

    fn parse(data: &str) -> Result<StaticQuoteSource, QuoteError> {
        let document: ChainDocument =
            serde_json::from_str(data).map_err(|error| QuoteError::Parse {
                message: error.to_string(),
            })?;
        Ok(document.into())
    }
}

impl QuoteSource for JsonQuoteSource {
    fn underlying_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        self.inner.underlying_price(symbol)
    }

    fn expirations(&self, symbol: &str) -> Result<Vec<NaiveDate>, QuoteError> {
        self.inner.expirations(symbol)
    }

    fn calls(&self, symbol: &str, expiration: NaiveDate) -> Result<Vec<CallQuote>, QuoteError> {
        self.inner.calls(symbol, expiration)
    }
}
