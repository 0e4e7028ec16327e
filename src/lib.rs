//! # implied-vol-rs
//!
//! Implied volatility estimation for European call options.
//!
//! The core of the crate inverts the Black-Scholes call formula with Brent's
//! method: given an observed option price, the underlying price, the strike,
//! the time to expiration and the risk-free rate, it recovers the volatility
//! at which the model reproduces the observed price.
//!
//! ## Layout
//!
//! - [`implied_volatility`]: the pure core. [`BlackScholes`] prices calls,
//!   [`solve_iv`] / [`solve_iv_in_bracket`] invert it.
//! - [`quotes`]: market data collaborators. A [`QuoteSource`] supplies
//!   underlying prices, expirations and call quotes and turns them into
//!   [`MarketQuote`]s.
//! - [`surface`]: one inversion per (strike, expiry) pair arranged into a
//!   [`VolatilitySurface`], with a text table renderer and a checksummed
//!   JSON snapshot for plotting tools.
//!
//! ## Example
//!
//! ```
//! use implied_vol::prelude::*;
//!
//! let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.05, 10.4506);
//! let estimate = solve_iv(&quote, &SolverConfig::default()).unwrap();
//! assert!((estimate.value - 0.2).abs() < 1e-4);
//!
//! // A price above the underlying cannot be reproduced at any volatility.
//! let quote = MarketQuote::new(100.0, 150.0, 0.01, 0.05, 60.0);
//! assert!(matches!(
//!     solve_iv(&quote, &SolverConfig::default()),
//!     Err(IVError::NoRootInBracket { .. })
//! ));
//! ```

pub mod implied_volatility;
pub mod quotes;
pub mod surface;

pub use implied_volatility::{
    BlackScholes, IVError, MarketQuote, SolverConfig, VolatilityEstimate, solve_iv,
    solve_iv_in_bracket,
};
pub use quotes::{JsonQuoteSource, PriceSource, QuoteError, QuoteSource, StaticQuoteSource};
pub use surface::{SurfaceConfig, SurfaceError, VolatilitySurface};

/// Commonly used types, re-exported for glob import.
pub mod prelude {
    pub use crate::implied_volatility::{
        BlackScholes, DEFAULT_BRACKET_HIGH, DEFAULT_BRACKET_LOW, IVError, MarketQuote,
        SolverConfig, VolatilityEstimate, solve_iv, solve_iv_in_bracket,
    };
    pub use crate::quotes::{
        CallQuote, JsonQuoteSource, OptionChain, PriceSource, QuoteError, QuoteSource,
        StaticQuoteSource, time_to_expiration,
    };
    pub use crate::surface::{
        CellOutcome, SurfaceConfig, SurfaceError, SurfaceSnapshot, SurfaceSnapshotPackage,
        VolatilitySurface, render_table,
    };
}
