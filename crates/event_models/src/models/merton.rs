//! Merton jump-diffusion.
//!
//! ```text
//! dX/X = μ dt + σ dW + (e^J - 1) dN,   J ~ N(μ_J, σ_J²),  N ~ Poisson(λ)
//! ```
//!
//! Estimation starts from the GBM moments and classifies outlier returns
//! (beyond [`JUMP_THRESHOLD_SIGMAS`] sample deviations from the mean) as
//! jumps; the diffusion variance is the total return variance net of the
//! jump-contributed variance, floored at [`DIFFUSION_VARIANCE_FLOOR`].

use crate::error::{EstimationError, ModelError};
use crate::models::dynamics::ModelFit;
use crate::models::{gbm, LIKELIHOOD_VARIANCE_FLOOR};
use event_core::math::stats;
use serde::{Deserialize, Serialize};

/// Returns further than this many sample deviations from the mean are
/// classified as jumps.
pub const JUMP_THRESHOLD_SIGMAS: f64 = 3.0;

/// Floor for the annualised diffusion variance after removing the jump
/// contribution, so σ stays strictly positive.
pub const DIFFUSION_VARIANCE_FLOOR: f64 = 1e-8;

/// Parameters of the Merton jump-diffusion model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MertonParams {
    /// Annualised diffusion drift (μ).
    pub mu: f64,
    /// Annualised diffusion volatility (σ), non-negative.
    pub sigma: f64,
    /// Jump intensity (λ), expected jumps per year, non-negative.
    pub lambda: f64,
    /// Mean log-jump size (μ_J).
    pub mu_jump: f64,
    /// Log-jump size deviation (σ_J), non-negative.
    pub sigma_jump: f64,
}

impl MertonParams {
    /// Creates validated parameters.
    pub fn new(
        mu: f64,
        sigma: f64,
        lambda: f64,
        mu_jump: f64,
        sigma_jump: f64,
    ) -> Result<Self, ModelError> {
        let params = Self {
            mu,
            sigma,
            lambda,
            mu_jump,
            sigma_jump,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the admissible ranges.
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
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(ModelError::invalid(
                "lambda",
                self.lambda,
                "non-negative and finite",
            ));
        }
        if !self.mu_jump.is_finite() {
            return Err(ModelError::invalid("mu_jump", self.mu_jump, "finite"));
        }
        if !(self.sigma_jump.is_finite() && self.sigma_jump >= 0.0) {
            return Err(ModelError::invalid(
                "sigma_jump",
                self.sigma_jump,
                "non-negative and finite",
            ));
        }
        Ok(())
    }
}

/// Advances the process one step: the exact GBM diffusion update times a
/// Bernoulli(λ·dt) jump factor `exp(μ_J + σ_J·Z_J)`.
///
/// The Bernoulli draw approximates the Poisson jump count over the step,
/// adequate while `λ·dt` stays well below one (monthly steps and single-digit
/// annual intensities).
#[inline]
pub fn step(
    value: f64,
    dt: f64,
    z: f64,
    jump_uniform: f64,
    jump_size_z: f64,
    params: &MertonParams,
) -> f64 {
    let drift = (params.mu - 0.5 * params.sigma * params.sigma) * dt;
    let diffusion = params.sigma * dt.sqrt() * z;
    let mut next = value * (drift + diffusion).exp();
    if jump_uniform < params.lambda * dt {
        next *= (params.mu_jump + params.sigma_jump * jump_size_z).exp();
    }
    next
}

/// Fits the jump-diffusion to a log-return sequence observed at spacing `dt`.
///
/// Classification: returns with `|r - Mean(r)| > 3·Std(r)` are jumps.
/// `λ = jumps / years observed`; jump mean/std come from the jump subsample
/// (std is zero with fewer than two jumps). The annualised diffusion
/// variance is `Var(r)/dt - λ·(μ_J² + σ_J²)`, floored at
/// [`DIFFUSION_VARIANCE_FLOOR`]; the drift is `μ = Mean(r)/dt + σ²/2` as in
/// the GBM fit it starts from. Residuals are the demeaned returns (jumps
/// included), so the normality diagnostic stays sensitive to the jumps
/// themselves; the likelihood is the Gaussian diffusion approximation.
///
/// # Errors
///
/// [`EstimationError::InsufficientData`] with fewer than
/// [`gbm::MIN_RETURNS`] returns.
pub fn estimate(returns: &[f64], dt: f64) -> Result<ModelFit<MertonParams>, EstimationError> {
    if returns.len() < gbm::MIN_RETURNS {
        return Err(EstimationError::InsufficientData {
            got: returns.len(),
            need: gbm::MIN_RETURNS,
        });
    }

    let m = stats::mean(returns);
    let total_variance = stats::sample_variance(returns);
    let threshold = JUMP_THRESHOLD_SIGMAS * total_variance.sqrt();

    let jumps: Vec<f64> = if threshold > 0.0 {
        returns
            .iter()
            .copied()
            .filter(|r| (r - m).abs() > threshold)
            .collect()
    } else {
        Vec::new()
    };

    let years = returns.len() as f64 * dt;
    let lambda = jumps.len() as f64 / years;
    let mu_jump = stats::mean(&jumps);
    let sigma_jump = if jumps.len() >= 2 {
        stats::sample_std(&jumps)
    } else {
        0.0
    };

    let total_annual = total_variance / dt;
    let jump_annual = lambda * (mu_jump * mu_jump + sigma_jump * sigma_jump);
    let diffusion_annual = (total_annual - jump_annual).max(DIFFUSION_VARIANCE_FLOOR);
    let sigma = diffusion_annual.sqrt();
    let mu = m / dt + 0.5 * diffusion_annual;

    let residuals: Vec<f64> = returns.iter().map(|r| r - m).collect();
    let log_likelihood = stats::gaussian_log_likelihood(
        returns,
        m,
        total_variance.max(LIKELIHOOD_VARIANCE_FLOOR),
    );

    let params = MertonParams::new(mu, sigma, lambda, mu_jump, sigma_jump)?;
    Ok(ModelFit {
        params,
        log_likelihood,
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_params_validation() {
        assert!(MertonParams::new(0.05, 0.2, 1.0, -0.1, 0.05).is_ok());
        assert!(MertonParams::new(0.05, 0.2, 0.0, 0.0, 0.0).is_ok()); // pure GBM
        assert!(MertonParams::new(0.05, -0.2, 1.0, 0.0, 0.05).is_err());
        assert!(MertonParams::new(0.05, 0.2, -1.0, 0.0, 0.05).is_err());
        assert!(MertonParams::new(0.05, 0.2, 1.0, f64::NAN, 0.05).is_err());
        assert!(MertonParams::new(0.05, 0.2, 1.0, 0.0, -0.05).is_err());
    }

    #[test]
    fn test_step_without_jump_matches_gbm() {
        let params = MertonParams::new(0.05, 0.2, 2.0, -0.1, 0.05).unwrap();
        let gbm_params = crate::models::gbm::GbmParams::new(0.05, 0.2).unwrap();
        let dt = 1.0 / 12.0;

        // jump_uniform above λ·dt suppresses the jump branch
        let with = step(100.0, dt, 0.7, 0.99, 1.3, &params);
        let without = crate::models::gbm::step(100.0, dt, 0.7, &gbm_params);
        assert_relative_eq!(with, without, epsilon = 1e-12);
    }

    #[test]
    fn test_step_jump_branch_applies_jump_factor() {
        let params = MertonParams::new(0.0, 0.0, 6.0, -0.2, 0.0).unwrap();
        let dt = 1.0 / 12.0;
        // λ·dt = 0.5, uniform 0.3 triggers the jump
        let jumped = step(100.0, dt, 0.0, 0.3, 0.0, &params);
        assert_relative_eq!(jumped, 100.0 * (-0.2_f64).exp(), epsilon = 1e-12);
        // uniform 0.6 does not
        let flat = step(100.0, dt, 0.0, 0.6, 0.0, &params);
        assert_relative_eq!(flat, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_classifies_seeded_jumps() {
        // Small alternating diffusion noise plus four large negative
        // outliers: the 3σ rule must pick out exactly the outliers.
        let dt = 1.0 / 252.0;
        let mut returns: Vec<f64> = (0..504)
            .map(|i| if i % 2 == 0 { 0.004 } else { -0.004 })
            .collect();
        for idx in [50, 150, 250, 350] {
            returns[idx] = -0.12;
        }

        let fit = estimate(&returns, dt).unwrap();
        // 504 daily observations = 2 years; 4 jumps → λ = 2/year
        assert_relative_eq!(fit.params.lambda, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.params.mu_jump, -0.12, epsilon = 1e-12);
        assert!(fit.params.sigma_jump.abs() < 1e-12);
        // Net diffusion volatility is close to the jump-free noise scale
        let clean_annual_sigma = (0.004_f64 * 0.004 / dt).sqrt();
        assert_relative_eq!(fit.params.sigma, clean_annual_sigma, max_relative = 0.25);
    }

    #[test]
    fn test_estimate_no_jumps_reduces_to_gbm_shape() {
        let dt = 1.0 / 252.0;
        let returns: Vec<f64> = (0..100)
            .map(|i| if i % 2 == 0 { 0.01 } else { -0.008 })
            .collect();
        let fit = estimate(&returns, dt).unwrap();
        assert_eq!(fit.params.lambda, 0.0);
        assert_eq!(fit.params.mu_jump, 0.0);
        assert_eq!(fit.params.sigma_jump, 0.0);

        let gbm_fit = gbm::estimate(&returns, dt).unwrap();
        assert_relative_eq!(fit.params.sigma, gbm_fit.params.sigma, epsilon = 1e-12);
        assert_relative_eq!(fit.params.mu, gbm_fit.params.mu, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_variance_floor_engages() {
        // Two identical large jumps dominate the sample variance; the
        // per-jump variance contribution λ·μ_J² then exceeds the total and
        // the net diffusion variance hits the floor.
        let dt = 1.0 / 252.0;
        let mut returns = vec![0.0005; 100];
        for (i, r) in returns.iter_mut().enumerate() {
            if i % 2 == 1 {
                *r = -0.0005;
            }
        }
        returns[20] = -0.9;
        returns[60] = -0.9;

        let fit = estimate(&returns, dt).unwrap();
        assert_relative_eq!(
            fit.params.sigma,
            DIFFUSION_VARIANCE_FLOOR.sqrt(),
            epsilon = 1e-15
        );
        assert_relative_eq!(fit.params.lambda, 2.0 / (100.0 * dt), epsilon = 1e-12);
        assert_relative_eq!(fit.params.mu_jump, -0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_rejects_short_input() {
        let err = estimate(&[0.01], 1.0 / 252.0).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
