//! Error types for quote loading.

use chrono::NaiveDate;
use std::fmt;

/// Errors raised while obtaining or converting option quotes.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// Reading a quote file failed.
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// A quote document could not be parsed.
    Parse {
        /// Parser error message.
        message: String,
    },

    /// No chain is known for the symbol.
    UnknownSymbol {
        /// Requested ticker symbol.
        symbol: String,
    },

    /// The symbol has no listed contracts for the expiration date.
    UnknownExpiration {
        /// Requested ticker symbol.
        symbol: String,
        /// Requested expiration date.
        expiration: NaiveDate,
        /// Dates that are listed for the symbol.
        available: Vec<NaiveDate>,
    },

    /// The expiration date is not after the valuation date.
    ExpiredContract {
        /// Contract expiration date.
        expiration: NaiveDate,
        /// Valuation date.
        as_of: NaiveDate,
    },

    /// The call quote carries neither a usable bid/ask nor a last price.
    NoPriceAvailable {
        /// Strike of the quote without a price.
        strike: f64,
    },
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Io { path, message } => {
                write!(f, "failed to read quotes from {path}: {message}")
            }
            QuoteError::Parse { message } => {
                write!(f, "failed to parse quotes: {message}")
            }
            QuoteError::UnknownSymbol { symbol } => {
                write!(f, "no option chain for symbol {symbol}")
            }
            QuoteError::UnknownExpiration {
                symbol,
                expiration,
                available,
            } => {
                let listed: Vec<String> = available.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{symbol} has no contracts expiring {expiration}; available: [{}]",
                    listed.join(", ")
                )
            }
            QuoteError::ExpiredContract { expiration, as_of } => {
                write!(
                    f,
                    "expiration {expiration} is not after valuation date {as_of}"
                )
            }
            QuoteError::NoPriceAvailable { strike } => {
                write!(f, "no price available for strike {strike}")
            }
        }
    }
}

impl std::error::Error for QuoteError {}
