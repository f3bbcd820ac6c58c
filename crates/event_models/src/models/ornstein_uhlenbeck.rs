//! Ornstein-Uhlenbeck (Vasicek) mean-reverting process.
//!
//! `dX = θ(μ - X)dt + σ dW`. Estimation runs an AR(1) least-squares
//! regression of levels on lagged levels and maps the discrete coefficients
//! back to continuous time. The diffusion is constant, so the Milstein
//! correction vanishes and the step reduces to Euler-Maruyama.

use crate::error::{EstimationError, ModelError};
use crate::models::dynamics::ModelFit;
use crate::models::LIKELIHOOD_VARIANCE_FLOOR;
use event_core::math::stats;
use serde::{Deserialize, Serialize};

/// Minimum number of level observations the estimator accepts (two lagged
/// pairs).
pub const MIN_LEVELS: usize = 3;

/// Lower clamp for the AR(1) slope before the log transform.
pub const AR1_SLOPE_MIN: f64 = 0.01;

/// Upper clamp for the AR(1) slope before the log transform.
pub const AR1_SLOPE_MAX: f64 = 0.99;

/// Parameters of the Ornstein-Uhlenbeck process.
///
/// # Model
///
/// ```text
/// dX = θ (μ - X) dt + σ dW
/// ```
///
/// θ is the annualised mean-reversion speed, μ the long-run level, σ the
/// annualised diffusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OuParams {
    /// Mean-reversion speed (θ), positive.
    pub theta: f64,
    /// Long-run mean (μ).
    pub mu: f64,
    /// Annualised diffusion (σ), non-negative.
    pub sigma: f64,
}

impl OuParams {
    /// Creates validated parameters.
    pub fn new(theta: f64, mu: f64, sigma: f64) -> Result<Self, ModelError> {
        let params = Self { theta, mu, sigma };
        params.validate()?;
        Ok(params)
    }

    /// Checks the admissible ranges: θ positive and finite, μ finite, σ
    /// non-negative and finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.theta.is_finite() && self.theta > 0.0) {
            return Err(ModelError::invalid(
                "theta",
                self.theta,
                "positive and finite",
            ));
        }
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

/// Advances the process one step. Constant diffusion makes the Milstein
/// correction zero, so this is the Euler-Maruyama update
/// `X' = X + θ(μ - X)·dt + σ·√dt·Z`.
#[inline]
pub fn step(value: f64, dt: f64, z: f64, params: &OuParams) -> f64 {
    value + params.theta * (params.mu - value) * dt + params.sigma * dt.sqrt() * z
}

/// Fits OU to a level sequence observed at spacing `dt` (year fraction).
///
/// AR(1) regression `X_t = α + β·X_{t-1} + ε_t`; β is clamped to
/// [[`AR1_SLOPE_MIN`], [`AR1_SLOPE_MAX`]] before the continuous-time mapping
/// `θ = -ln(β)/dt`, `μ = α/(1-β)`. σ inverts the exact discretisation
/// variance `Var(ε) = σ²(1 - e^(-2θ·dt))/(2θ)`, where `e^(-θ·dt)` is the
/// clamped β, so the denominator `1 - β²` is bounded away from zero.
/// Residuals come from the unclamped least-squares fit; the clamp only
/// affects the continuous-time mapping.
///
/// # Errors
///
/// - [`EstimationError::InsufficientData`] with fewer than [`MIN_LEVELS`]
///   levels
/// - [`EstimationError::DegenerateFit`] when the lagged levels have zero
///   variance (the regression denominator vanishes)
pub fn estimate(levels: &[f64], dt: f64) -> Result<ModelFit<OuParams>, EstimationError> {
    if levels.len() < MIN_LEVELS {
        return Err(EstimationError::InsufficientData {
            got: levels.len(),
            need: MIN_LEVELS,
        });
    }

    let lagged = &levels[..levels.len() - 1];
    let current = &levels[1..];
    let n = lagged.len() as f64;

    let mean_lag = stats::mean(lagged);
    let mean_cur = stats::mean(current);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in lagged.iter().zip(current.iter()) {
        sxx += (x - mean_lag) * (x - mean_lag);
        sxy += (x - mean_lag) * (y - mean_cur);
    }
    if sxx <= 0.0 {
        return Err(EstimationError::degenerate(
            "zero variance in lagged levels",
        ));
    }

    let beta_raw = sxy / sxx;
    let alpha = mean_cur - beta_raw * mean_lag;
    if !beta_raw.is_finite() || !alpha.is_finite() {
        return Err(EstimationError::degenerate(format!(
            "non-finite regression coefficients: alpha = {alpha}, beta = {beta_raw}"
        )));
    }

    let beta = beta_raw.clamp(AR1_SLOPE_MIN, AR1_SLOPE_MAX);
    let theta = -beta.ln() / dt;
    let mu = alpha / (1.0 - beta);

    // Residuals from the unclamped fit; their ML variance feeds both the
    // diffusion inversion and the likelihood.
    let residuals: Vec<f64> = lagged
        .iter()
        .zip(current.iter())
        .map(|(x, y)| y - (alpha + beta_raw * x))
        .collect();
    let residual_variance: f64 = residuals.iter().map(|e| e * e).sum::<f64>() / n;

    // Var(ε) = σ²(1 - e^(-2θdt))/(2θ) and e^(-θdt) = β ⇒ σ² = Var(ε)·2θ/(1-β²)
    let sigma = (residual_variance * 2.0 * theta / (1.0 - beta * beta)).sqrt();

    let log_likelihood = stats::gaussian_log_likelihood(
        &residuals,
        0.0,
        residual_variance.max(LIKELIHOOD_VARIANCE_FLOOR),
    );

    let params = OuParams::new(theta, mu, sigma)?;
    Ok(ModelFit {
        params,
        log_likelihood,
        residuals,
    })
}
