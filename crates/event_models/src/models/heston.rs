//! Heston stochastic-volatility model, calibrated by a moment-based proxy.
//!
//! ```text
//! dX = μ X dt + √v X dW₁
//! dv = κ (θ - v) dt + ξ √v dW₂,   corr(dW₁, dW₂) = ρ
//! ```
//!
//! This is **not** a full Heston MLE or filter. The variance parameters
//! (κ, θ, ξ) come from fitting the Ornstein-Uhlenbeck estimator to the
//! annualised squared-return series, treating instantaneous variance as
//! mean-reverting; ρ is not estimated from data at all but fixed at the
//! leverage-effect constant [`LEVERAGE_RHO`]; v₀ is the most recent
//! annualised squared return. The reported log-likelihood is that of the
//! variance-proxy regression, not of the price path.
//!
//! Stepping uses full-truncation log-Euler for the price and a Milstein
//! correction on the variance, both floored so the variance never goes
//! negative.

use crate::error::{EstimationError, ModelError};
use crate::models::dynamics::ModelFit;
use crate::models::ornstein_uhlenbeck;
use event_core::math::stats;
use serde::{Deserialize, Serialize};

/// Fixed price/variance shock correlation (the equity leverage effect).
pub const LEVERAGE_RHO: f64 = -0.7;

/// Parameters of the Heston model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HestonParams {
    /// Annualised price drift (μ).
    pub mu: f64,
    /// Variance mean-reversion speed (κ), positive.
    pub kappa: f64,
    /// Long-run variance (θ), non-negative.
    pub theta: f64,
    /// Volatility of variance (ξ), non-negative.
    pub xi: f64,
    /// Price/variance shock correlation (ρ) in [-1, 1].
    pub rho: f64,
    /// Initial instantaneous variance (v₀), non-negative.
    pub v0: f64,
}

impl HestonParams {
    /// Creates validated parameters.
    pub fn new(
        mu: f64,
        kappa: f64,
        theta: f64,
        xi: f64,
        rho: f64,
        v0: f64,
    ) -> Result<Self, ModelError> {
        let params = Self {
            mu,
            kappa,
            theta,
            xi,
            rho,
            v0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the admissible ranges. The Feller condition `2κθ ≥ ξ²` is not
    /// required: the truncated scheme keeps the variance non-negative
    /// regardless.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.mu.is_finite() {
            return Err(ModelError::invalid("mu", self.mu, "finite"));
        }
        if !(self.kappa.is_finite() && self.kappa > 0.0) {
            return Err(ModelError::invalid(
                "kappa",
                self.kappa,
                "positive and finite",
            ));
        }
        if !(self.theta.is_finite() && self.theta >= 0.0) {
            return Err(ModelError::invalid(
                "theta",
                self.theta,
                "non-negative and finite",
            ));
        }
        if !(self.xi.is_finite() && self.xi >= 0.0) {
            return Err(ModelError::invalid(
                "xi",
                self.xi,
                "non-negative and finite",
            ));
        }
        if !(self.rho.is_finite() && (-1.0..=1.0).contains(&self.rho)) {
            return Err(ModelError::invalid("rho", self.rho, "within [-1, 1]"));
        }
        if !(self.v0.is_finite() && self.v0 >= 0.0) {
            return Err(ModelError::invalid(
                "v0",
                self.v0,
                "non-negative and finite",
            ));
        }
        Ok(())
    }
}

/// Advances `(value, variance)` one step.
///
/// `z_price` is the copula-coupled price shock; `z_independent` is an
/// independent draw mixed into the variance shock as
/// `Z_v = ρ·Z_s + √(1-ρ²)·Z_ind`. The variance update carries the Milstein
/// correction `ξ²·dt·(Z_v² - 1)/4` and is floored at zero; the price update
/// is full-truncation log-Euler.
#[inline]
pub fn step(
    value: f64,
    variance: f64,
    dt: f64,
    z_price: f64,
    z_independent: f64,
    params: &HestonParams,
) -> (f64, f64) {
    let v_plus = variance.max(0.0);
    let z_v = params.rho * z_price + (1.0 - params.rho * params.rho).sqrt() * z_independent;

    let v_next = variance
        + params.kappa * (params.theta - v_plus) * dt
        + params.xi * v_plus.sqrt() * dt.sqrt() * z_v
        + 0.25 * params.xi * params.xi * dt * (z_v * z_v - 1.0);
    let v_next = v_next.max(0.0);

    let next_value = value * ((params.mu - 0.5 * v_plus) * dt + (v_plus * dt).sqrt() * z_price).exp();
    (next_value, v_next)
}

/// Fits the Heston proxy to a log-return sequence observed at spacing `dt`.
///
/// The annualised squared returns `v_t = r_t²/dt` serve as an observable
/// variance proxy; the OU estimator on that series yields κ (reversion),
/// θ (long-run, clamped at zero from below) and ξ (vol-of-vol). The drift is
/// `μ = Mean(r)/dt + θ/2` and `v₀ = r_n²/dt` from the most recent return.
///
/// # Errors
///
/// Propagates the OU estimator's failures: at least
/// [`ornstein_uhlenbeck::MIN_LEVELS`] returns are needed, and a
/// dispersion-free proxy series is a degenerate fit.
pub fn estimate(returns: &[f64], dt: f64) -> Result<ModelFit<HestonParams>, EstimationError> {
    let proxy: Vec<f64> = returns.iter().map(|r| r * r / dt).collect();
    let ou_fit = ornstein_uhlenbeck::estimate(&proxy, dt)?;

    let kappa = ou_fit.params.theta;
    // A noisy proxy regression can place the long-run level slightly below
    // zero; clamp instead of failing.
    let theta = ou_fit.params.mu.max(0.0);
    let xi = ou_fit.params.sigma;
    let v0 = proxy[proxy.len() - 1];
    let mu = stats::mean(returns) / dt + 0.5 * theta;

    let params = HestonParams::new(mu, kappa, theta, xi, LEVERAGE_RHO, v0)?;
    Ok(ModelFit {
        params,
        log_likelihood: ou_fit.log_likelihood,
        residuals: ou_fit.residuals,
    })
}
