//! Value types for implied volatility calculation.

use super::error::IVError;
use serde::{Deserialize, Serialize};

/// Market observation of a European call option.
///
/// A quote is a plain value: constructing one never fails, and
/// [`MarketQuote::validate`] checks the invariants the pricer depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Underlying spot price in price units.
    pub underlying_price: f64,
    /// Option strike price in price units.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%). May be negative.
    pub risk_free_rate: f64,
    /// Observed market price of the call option.
    pub observed_price: f64,
}

impl MarketQuote {
    /// Creates a new market quote.
    ///
    /// # Arguments
    /// - `underlying_price`: Underlying spot price in price units
    /// - `strike`: Option strike price in price units
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `observed_price`: Observed option price to invert
    #[must_use]
    pub fn new(
        underlying_price: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        observed_price: f64,
    ) -> Self {
        Self {
            underlying_price,
            strike,
            time_to_expiry,
            risk_free_rate,
            observed_price,
        }
    }

    /// Returns a copy of this quote with a different observed price.
    #[must_use]
    pub fn with_observed_price(self, observed_price: f64) -> Self {
        Self {
            observed_price,
            ..self
        }
    }

    /// Checks the quote invariants.
    ///
    /// Underlying price, strike and time to expiry must be strictly positive,
    /// the observed price non-negative, and every field finite.
    ///
    /// # Returns
    /// - `Ok(())` if the quote can be priced
    /// - `Err(IVError::InvalidQuote)` naming the first offending field
    pub fn validate(&self) -> Result<(), IVError> {
        if !(self.underlying_price.is_finite() && self.underlying_price > 0.0) {
            return Err(IVError::InvalidQuote {
                message: format!(
                    "underlying price must be positive, got {}",
                    self.underlying_price
                ),
            });
        }

        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(IVError::InvalidQuote {
                message: format!("strike price must be positive, got {}", self.strike),
            });
        }

        if !(self.time_to_expiry.is_finite() && self.time_to_expiry > 0.0) {
            return Err(IVError::InvalidQuote {
                message: format!(
                    "time to expiry must be positive, got {}",
                    self.time_to_expiry
                ),
            });
        }

        if !self.risk_free_rate.is_finite() {
            return Err(IVError::InvalidQuote {
                message: format!(
                    "risk-free rate must be finite, got {}",
                    self.risk_free_rate
                ),
            });
        }

        if !(self.observed_price.is_finite() && self.observed_price >= 0.0) {
            return Err(IVError::InvalidQuote {
                message: format!(
                    "observed price must be non-negative, got {}",
                    self.observed_price
                ),
            });
        }

        Ok(())
    }

    /// Discount factor e^(-rT).
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Lowest price the model can produce: max(S - K·e^(-rT), 0).
    ///
    /// This is the limit of the call price as volatility goes to zero.
    #[must_use]
    pub fn intrinsic_floor(&self) -> f64 {
        (self.underlying_price - self.strike * self.discount_factor()).max(0.0)
    }

    /// Supremum of the model price, reached as volatility goes to infinity.
    #[must_use]
    pub fn price_ceiling(&self) -> f64 {
        self.underlying_price
    }

    /// Returns true if the observed price lies strictly inside the range
    /// the model can reproduce.
    #[must_use]
    pub fn is_price_attainable(&self) -> bool {
        self.observed_price > self.intrinsic_floor() && self.observed_price < self.price_ceiling()
    }
}

/// Result of an implied volatility inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEstimate {
    /// Implied volatility (annualized, e.g., 0.25 = 25%).
    pub value: f64,
    /// Whether the solver met its tolerance.
    pub converged: bool,
    /// Number of root-finder iterations used.
    pub iterations: u32,
}

impl VolatilityEstimate {
    /// Creates a converged estimate.
    #[must_use]
    pub fn converged(value: f64, iterations: u32) -> Self {
        Self {
            value,
            converged: true,
            iterations,
        }
    }

    /// Returns the volatility as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn value_percent(&self) -> f64 {
        self.value * 100.0
    }
}
