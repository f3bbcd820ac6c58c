//! Geometric Brownian Motion.
//!
//! `dX = μX dt + σX dW` — the lognormal-return model. Estimation is
//! closed-form from log-returns; stepping uses the exact lognormal update, so
//! the scheme introduces no discretisation bias at any step size.

use crate::error::{EstimationError, ModelError};
use crate::models::dynamics::ModelFit;
use crate::models::LIKELIHOOD_VARIANCE_FLOOR;
use event_core::math::stats;
use serde::{Deserialize, Serialize};

/// Minimum number of return observations the estimator accepts.
pub const MIN_RETURNS: usize = 2;

/// Parameters of Geometric Brownian Motion.
///
/// # Model
///
/// ```text
/// dX = μ X dt + σ X dW
/// ```
///
/// Both parameters are annualised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParams {
    /// Annualised drift (μ).
    pub mu: f64,
    /// Annualised volatility (σ), non-negative.
    pub sigma: f64,
}

impl GbmParams {
    /// Creates validated parameters.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, ModelError> {
        let params = Self { mu, sigma };
        params.validate()?;
        Ok(params)
    }

    /// Checks the admissible ranges: μ finite, σ non-negative and finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.mu.is_finite() {
            return Err(ModelError::invalid("mu", self.mu, "finite"));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(ModelError::invalid(
                "sigma",
                self.sigma,
                "non-negative and finite",
            ));
        }
        Ok(())
    }
}

/// Advances the process one step with the exact lognormal update
/// `X' = X · exp((μ - σ²/2)·dt + σ·√dt·Z)`.
#[inline]
pub fn step(value: f64, dt: f64, z: f64, params: &GbmParams) -> f64 {
    let drift = (params.mu - 0.5 * params.sigma * params.sigma) * dt;
    let diffusion = params.sigma * dt.sqrt() * z;
    value * (drift + diffusion).exp()
}

/// Fits GBM to a log-return sequence observed at spacing `dt` (year
/// fraction).
///
/// Closed form: `σ = √(Var(r)/dt)`, `μ = Mean(r)/dt + σ²/2`, with the
/// unbiased sample variance. Residuals are the demeaned returns; the
/// log-likelihood is Gaussian at the fitted mean/variance.
///
/// # Errors
///
/// [`EstimationError::InsufficientData`] with fewer than [`MIN_RETURNS`]
/// returns.
pub fn estimate(returns: &[f64], dt: f64) -> Result<ModelFit<GbmParams>, EstimationError> {
    if returns.len() < MIN_RETURNS {
        return Err(EstimationError::InsufficientData {
            got: returns.len(),
            need: MIN_RETURNS,
        });
    }

    let m = stats::mean(returns);
    let variance = stats::sample_variance(returns);
    let sigma = (variance / dt).sqrt();
    let mu = m / dt + 0.5 * sigma * sigma;

    let residuals: Vec<f64> = returns.iter().map(|r| r - m).collect();
    let log_likelihood =
        stats::gaussian_log_likelihood(returns, m, variance.max(LIKELIHOOD_VARIANCE_FLOOR));

    let params = GbmParams::new(mu, sigma)?;
    Ok(ModelFit {
        params,
        log_likelihood,
        residuals,
    })
}
