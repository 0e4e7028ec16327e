//! Brent's method solver for implied volatility calculation.
//!
//! This module finds the volatility that makes the Black-Scholes price equal
//! to the observed market price. The call price is strictly increasing in
//! volatility, so a bracket whose endpoints straddle the observed price holds
//! exactly one root, and Brent's method is guaranteed to find it.

use super::black_scholes::BlackScholes;
use super::error::IVError;
use super::types::{MarketQuote, VolatilityEstimate};
use serde::{Deserialize, Serialize};

/// Default lower volatility bound (0.001%).
pub const DEFAULT_BRACKET_LOW: f64 = 1e-5;
/// Default upper volatility bound (1000%).
pub const DEFAULT_BRACKET_HIGH: f64 = 10.0;

/// Configuration for the Brent solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lower volatility bound of the search bracket (default: 1e-5).
    pub bracket_low: f64,
    /// Upper volatility bound of the search bracket (default: 10.0).
    pub bracket_high: f64,
    /// Absolute convergence tolerance on volatility.
    pub tolerance: f64,
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bracket_low: DEFAULT_BRACKET_LOW,
            bracket_high: DEFAULT_BRACKET_HIGH,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the volatility bracket.
    #[must_use]
    pub fn with_bracket(mut self, bracket_low: f64, bracket_high: f64) -> Self {
        self.bracket_low = bracket_low;
        self.bracket_high = bracket_high;
        self
    }

    /// Checks that the configuration can drive the solver.
    pub fn validate(&self) -> Result<(), IVError> {
        validate_bracket(self.bracket_low, self.bracket_high)?;

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(IVError::InvalidConfig {
                message: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }

        if self.max_iterations == 0 {
            return Err(IVError::InvalidConfig {
                message: "max iterations must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn validate_bracket(low: f64, high: f64) -> Result<(), IVError> {
    if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
        return Err(IVError::InvalidConfig {
            message: format!("bracket must satisfy 0 < low < high, got [{low}, {high}]"),
        });
    }
    Ok(())
}

/// Solves for implied volatility inside the configured default bracket.
///
/// # Example
/// ```
/// use implied_vol::{MarketQuote, SolverConfig, solve_iv};
///
/// let quote = MarketQuote::new(100.0, 100.0, 1.0, 0.05, 10.450583572185565);
/// let estimate = solve_iv(&quote, &SolverConfig::default()).unwrap();
/// assert!((estimate.value - 0.2).abs() < 1e-6);
/// ```
pub fn solve_iv(quote: &MarketQuote, config: &SolverConfig) -> Result<VolatilityEstimate, IVError> {
    solve_iv_in_bracket(quote, config.bracket_low, config.bracket_high, config)
}

/// Solves for implied volatility inside an explicit bracket using Brent's method.
///
/// The bracket overrides the one in `config`; tolerance and iteration cap are
/// taken from `config`.
///
/// # Arguments
/// - `quote`: Market quote whose observed price is to be matched
/// - `bracket_low`: Lower volatility bound
/// - `bracket_high`: Upper volatility bound
/// - `config`: Solver configuration
///
/// # Returns
/// - `Ok(VolatilityEstimate)`: Converged volatility and iteration count
/// - `Err(IVError::InvalidConfig)`: Unusable bracket, tolerance or cap
/// - `Err(IVError::InvalidQuote)`: Quote violates its invariants
/// - `Err(IVError::NoRootInBracket)`: Observed price unreachable in the bracket
/// - `Err(IVError::DidNotConverge)`: Iteration cap exhausted
pub fn solve_iv_in_bracket(
    quote: &MarketQuote,
    bracket_low: f64,
    bracket_high: f64,
    config: &SolverConfig,
) -> Result<VolatilityEstimate, IVError> {
    config.with_bracket(bracket_low, bracket_high).validate()?;
    quote.validate()?;

    let objective = |vol: f64| BlackScholes::call_price(quote, vol) - quote.observed_price;

    match brent(objective, bracket_low, bracket_high, config)? {
        Some((vol, iterations)) => Ok(VolatilityEstimate::converged(vol, iterations)),
        None => Err(IVError::NoRootInBracket {
            bracket_low,
            bracket_high,
            observed_price: quote.observed_price,
        }),
    }
}

/// Brent root finder over `[low, high]`.
///
/// Returns `Ok(None)` when `f` has the same sign at both endpoints,
/// otherwise the root and the number of iterations used.
fn brent<F>(f: F, low: f64, high: f64, config: &SolverConfig) -> Result<Option<(f64, u32)>, IVError>
where
    F: Fn(f64) -> f64,
{
    let mut a = low;
    let mut b = high;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(Some((a, 0)));
    }
    if fb == 0.0 {
        return Ok(Some((b, 0)));
    }
    if fa.signum() == fb.signum() || fa.is_nan() || fb.is_nan() {
        return Ok(None);
    }

    // b is the best estimate, c the contrapoint with f(c) of opposite sign.
    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    // One extra pass tests the step taken on the last allowed iteration.
    for iteration in 1..=config.max_iterations.saturating_add(1) {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let m = 0.5 * (c - b);

        if m.abs() <= tol || fb == 0.0 {
            return Ok(Some((b, iteration.min(config.max_iterations))));
        }
        if iteration > config.max_iterations {
            break;
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * m * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * m * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
    }

    Err(IVError::DidNotConverge {
        iterations: config.max_iterations,
        last_volatility: b,
    })
}
