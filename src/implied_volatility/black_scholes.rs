//! Black-Scholes pricing of European call options.
//!
//! This module provides the forward model that the solver inverts.
//! No dividend yield term is modelled.

use super::types::MarketQuote;
use statrs::function::erf::erfc;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Black-Scholes pricing model implementation.
pub struct BlackScholes;

impl BlackScholes {
    /// Standard normal cumulative distribution function (CDF).
    ///
    /// Computed as `0.5 · erfc(-x / √2)`, which keeps full relative
    /// precision in the lower tail.
    ///
    /// # Arguments
    /// - `x`: Input value
    ///
    /// # Returns
    /// Probability that a standard normal variable is less than or equal to x
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * erfc(-x / SQRT_2)
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `spot`: Current underlying price (S)
    /// - `strike`: Option strike price (K)
    /// - `rate`: Risk-free interest rate (r)
    /// - `time`: Time to expiration in years (T)
    /// - `vol`: Volatility (σ)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Calculates the theoretical call price.
    ///
    /// C = S·N(d1) - K·e^(-rT)·N(d2)
    ///
    /// The quote's observed price is ignored. Callers must ensure the quote
    /// passes [`MarketQuote::validate`] and that `vol > 0`; the price is
    /// strictly increasing in `vol` under those conditions.
    ///
    /// When σ√T is not a positive number (for example when it underflows),
    /// the σ → 0 limit `max(S - K·e^(-rT), 0)` is returned. When it
    /// overflows, the σ → ∞ limit `S` is returned.
    ///
    /// # Arguments
    /// - `quote`: Market parameters (spot, strike, time, rate)
    /// - `vol`: Volatility (σ)
    ///
    /// # Returns
    /// Theoretical call price
    #[must_use]
    pub fn call_price(quote: &MarketQuote, vol: f64) -> f64 {
        let spot = quote.underlying_price;
        let strike = quote.strike;
        let time = quote.time_to_expiry;
        let discount = quote.discount_factor();

        let vol_sqrt_time = vol * time.sqrt();
        if !(vol_sqrt_time > 0.0) {
            return (spot - strike * discount).max(0.0);
        }
        if vol_sqrt_time.is_infinite() {
            return spot;
        }

        let mut d1 = Self::d1(spot, strike, quote.risk_free_rate, time, vol);
        if !d1.is_finite() && vol > 1.0 {
            // σ²T overflowed; each term of the expanded form stays finite.
            d1 = (spot / strike).ln() / vol_sqrt_time
                + (quote.risk_free_rate / vol + 0.5 * vol) * time.sqrt();
        }
        let d2 = d1 - vol_sqrt_time;

        spot * Self::norm_cdf(d1) - strike * discount * Self::norm_cdf(d2)
    }
}
