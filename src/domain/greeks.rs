//! Black-Scholes-Merton (1973) European call option Greeks.
//!
//! Closed-form sensitivities of the call value to spot, time, rate and
//! volatility. `t` is the valuation date and `maturity` the expiry date,
//! both in years, with `maturity > t`.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};

fn standard_normal() -> Normal {
    Normal::standard()
}

fn d1(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * tau) / (sigma * tau.sqrt())
}

fn d2(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    d1(spot, strike, t, maturity, rate, sigma) - sigma * (maturity - t).sqrt()
}

/// Call DELTA: sensitivity of the option value to the spot level.
pub fn call_delta(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    standard_normal().cdf(d1(spot, strike, t, maturity, rate, sigma))
}

/// Call GAMMA: second-order sensitivity to the spot level.
pub fn call_gamma(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    standard_normal().pdf(d1(spot, strike, t, maturity, rate, sigma)) / (spot * sigma * tau.sqrt())
}

/// Call THETA: sensitivity to the passage of time (per year, negative for
/// a long call).
pub fn call_theta(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    let n = standard_normal();
    let d1v = d1(spot, strike, t, maturity, rate, sigma);
    let d2v = d1v - sigma * tau.sqrt();
    -(spot * n.pdf(d1v) * sigma / (2.0 * tau.sqrt())
        + rate * strike * (-rate * tau).exp() * n.cdf(d2v))
}

/// Call VEGA: sensitivity to volatility (per unit of sigma).
pub fn call_vega(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    spot * standard_normal().pdf(d1(spot, strike, t, maturity, rate, sigma)) * tau.sqrt()
}

/// Call RHO: sensitivity to the risk-free rate.
pub fn call_rho(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    strike * tau * (-rate * tau).exp()
        * standard_normal().cdf(d2(spot, strike, t, maturity, rate, sigma))
}

/// Present value of the European call.
pub fn call_value(spot: f64, strike: f64, t: f64, maturity: f64, rate: f64, sigma: f64) -> f64 {
    let tau = maturity - t;
    let n = standard_normal();
    spot * n.cdf(d1(spot, strike, t, maturity, rate, sigma))
        - strike * (-rate * tau).exp() * n.cdf(d2(spot, strike, t, maturity, rate, sigma))
}
