//! Implied volatility of European call options.
//!
//! This module recovers the volatility implied by an observed option price
//! by inverting the Black-Scholes model with Brent's method.
//!
//! # Overview
//!
//! A quote carries the observed call price; the estimate restates it as the
//! annualized volatility the model needs to reach that price. Quotes are
//! compared across strikes and expiries in this volatility form.
//!
//! # Black-Scholes Inversion
//!
//! There is no closed form for the inverse of Black-Scholes, so the solver
//! searches a volatility bracket (default `[1e-5, 10]`) for the root of
//! `price(σ) - observed_price`. The call price increases strictly with σ,
//! from `max(S - K·e^(-rT), 0)` as σ → 0 up to `S` as σ → ∞, so an observed
//! price outside that range has no solution and is reported as
//! [`IVError::NoRootInBracket`].
//!
//! Both the pricer and the solver are pure functions: no I/O, no logging,
//! no shared state.
//!
//! # Example
//!
//! ```
//! use implied_vol::implied_volatility::{BlackScholes, MarketQuote, SolverConfig, solve_iv};
//!
//! let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.05, 0.0);
//! let price = BlackScholes::call_price(&quote, 0.2);
//!
//! let estimate = solve_iv(&quote.with_observed_price(price), &SolverConfig::default()).unwrap();
//! assert!((estimate.value - 0.2).abs() < 1e-6);
//! ```

mod black_scholes;
mod error;
mod solver;
mod types;

pub use black_scholes::BlackScholes;
pub use error::IVError;
pub use solver::{
    DEFAULT_BRACKET_HIGH, DEFAULT_BRACKET_LOW, SolverConfig, solve_iv, solve_iv_in_bracket,
};
pub use types::{MarketQuote, VolatilityEstimate};
