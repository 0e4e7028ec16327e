//! Error types for implied volatility calculation.

use std::fmt;

/// Errors specific to IV calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum IVError {
    /// The market quote violates its invariants.
    InvalidQuote {
        /// Description of the invalid field.
        message: String,
    },

    /// The objective does not change sign across the bracket, so the
    /// observed price cannot be reproduced by any volatility inside it.
    NoRootInBracket {
        /// Lower volatility bound.
        bracket_low: f64,
        /// Upper volatility bound.
        bracket_high: f64,
        /// Observed option price that could not be matched.
        observed_price: f64,
    },

    /// Root finder did not converge within max iterations.
    DidNotConverge {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate before giving up.
        last_volatility: f64,
    },

    /// Solver configuration is unusable.
    InvalidConfig {
        /// Description of the invalid setting.
        message: String,
    },
}

impl fmt::Display for IVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IVError::InvalidQuote { message } => {
                write!(f, "invalid quote: {message}")
            }
            IVError::NoRootInBracket {
                bracket_low,
                bracket_high,
                observed_price,
            } => {
                write!(
                    f,
                    "no implied volatility in [{bracket_low}, {bracket_high}] reproduces observed price {observed_price:.4}"
                )
            }
            IVError::DidNotConverge {
                iterations,
                last_volatility,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last volatility: {last_volatility:.6}"
                )
            }
            IVError::InvalidConfig { message } => {
                write!(f, "invalid solver configuration: {message}")
            }
        }
    }
}

impl std::error::Error for IVError {}
