//! Market data collaborators.
//!
//! A [`QuoteSource`] supplies the underlying price, the listed expirations and
//! the call quotes for a ticker symbol. The solver never sees where the data
//! came from: this module turns it into [`MarketQuote`](crate::MarketQuote)
//! values (observed price, strike, time to expiry in years) and nothing else
//! crosses the boundary.

mod chain;
mod error;
mod source;

pub use chain::{
    CallQuote, DAYS_PER_YEAR, ExpirationSlice, OptionChain, PriceSource, market_quote,
    time_to_expiration,
};
pub use error::QuoteError;
pub use source::{ChainDocument, JsonQuoteSource, QuoteSource, StaticQuoteSource};
