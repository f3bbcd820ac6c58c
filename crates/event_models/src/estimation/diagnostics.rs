//! Goodness-of-fit diagnostics computed on every estimation.
//!
//! Two binary verdicts back the dashboard's fit-quality indicators: residual
//! normality through the Jarque-Bera statistic, and residual
//! heteroskedasticity through the lag-1 autocorrelation of squared
//! residuals (an ARCH-effect screen). Both thresholds are fixed rather than
//! configurable so verdicts are comparable across variables.

use event_core::math::stats;
use serde::{Deserialize, Serialize};

/// 95th percentile of χ²(2): the Jarque-Bera statistic above this rejects
/// residual normality.
pub const JARQUE_BERA_THRESHOLD: f64 = 5.99;

/// Absolute lag-1 autocorrelation of squared residuals above this flags
/// heteroskedasticity.
pub const HETEROSKEDASTICITY_THRESHOLD: f64 = 0.2;

/// Jarque-Bera test statistic `n/6 · (S² + (K−3)²/4)` from the sample
/// skewness `S` and (non-excess) kurtosis `K`.
///
/// Zero for fewer than two observations or a dispersion-free sample, both of
/// which the moment helpers report as exactly normal-shaped.
pub fn jarque_bera(residuals: &[f64]) -> f64 {
    let n = residuals.len() as f64;
    let s = stats::skewness(residuals);
    let k = stats::kurtosis(residuals);
    n / 6.0 * (s * s + (k - 3.0) * (k - 3.0) / 4.0)
}

/// Akaike information criterion `2k − 2·logL`.
pub fn aic(log_likelihood: f64, k: usize) -> f64 {
    2.0 * k as f64 - 2.0 * log_likelihood
}

/// Bayesian information criterion `k·ln(n) − 2·logL`.
pub fn bic(log_likelihood: f64, k: usize, n: usize) -> f64 {
    k as f64 * (n as f64).ln() - 2.0 * log_likelihood
}

/// Fit-quality report attached to every [`ParameterEstimate`].
///
/// [`ParameterEstimate`]: crate::estimation::ParameterEstimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationDiagnostics {
    /// Gaussian log-likelihood of the fit.
    pub log_likelihood: f64,
    /// Akaike information criterion.
    pub aic: f64,
    /// Bayesian information criterion.
    pub bic: f64,
    /// Whether the fit completed with finite likelihood. Closed-form
    /// estimators report true on every successful fit.
    pub convergence: bool,
    /// Jarque-Bera verdict: true when residuals look Gaussian at 95%.
    pub residual_normality: bool,
    /// ARCH screen: true when squared residuals show lag-1 autocorrelation
    /// beyond [`HETEROSKEDASTICITY_THRESHOLD`].
    pub heteroskedasticity: bool,
}

impl EstimationDiagnostics {
    /// Scores a fit with `k` free parameters from its likelihood and
    /// residual sequence.
    pub fn from_fit(log_likelihood: f64, k: usize, residuals: &[f64]) -> Self {
        let n = residuals.len();
        let jb = jarque_bera(residuals);
        let squared: Vec<f64> = residuals.iter().map(|r| r * r).collect();
        let arch = stats::autocorrelation(&squared, 1);
        Self {
            log_likelihood,
            aic: aic(log_likelihood, k),
            bic: bic(log_likelihood, k, n),
            convergence: log_likelihood.is_finite(),
            residual_normality: jb < JARQUE_BERA_THRESHOLD,
            heteroskedasticity: arch.abs() > HETEROSKEDASTICITY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use event_core::math::norm_inv_cdf;

    /// Perfect normal quantile sample: skewness 0, kurtosis close to 3.
    fn normal_quantile_sample(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| norm_inv_cdf((i as f64 + 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn test_jarque_bera_near_zero_for_normal_quantiles() {
        let sample = normal_quantile_sample(500);
        let jb = jarque_bera(&sample);
        assert!(jb < JARQUE_BERA_THRESHOLD, "JB = {jb}");
    }

    #[test]
    fn test_jarque_bera_rejects_two_point_sample() {
        // ±1 alternating: skewness 0, kurtosis 1, so JB = n/6 exactly
        let sample: Vec<f64> = (0..60).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let jb = jarque_bera(&sample);
        assert_relative_eq!(jb, 10.0, epsilon = 1e-9);
        assert!(jb > JARQUE_BERA_THRESHOLD);
    }

    #[test]
    fn test_information_criteria() {
        assert_relative_eq!(aic(-100.0, 3), 206.0);
        assert_relative_eq!(bic(-100.0, 3, 100), 3.0 * 100.0_f64.ln() + 200.0);
        // BIC penalises harder than AIC once ln(n) > 2
        assert!(bic(-100.0, 3, 100) > aic(-100.0, 3));
    }

    #[test]
    fn test_from_fit_flags_volatility_clustering() {
        // residual magnitude alternates, so squared residuals are strongly
        // negatively autocorrelated at lag 1
        let residuals: Vec<f64> = (0..80)
            .map(|i| if i % 2 == 0 { 0.5 } else { 0.01 } * if i % 4 < 2 { 1.0 } else { -1.0 })
            .collect();
        let diag = EstimationDiagnostics::from_fit(-50.0, 2, &residuals);
        assert!(diag.heteroskedasticity);
        assert!(diag.convergence);
    }

    #[test]
    fn test_from_fit_clean_residuals_pass_both_screens() {
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        // quantile grids are sorted, which would make squared residuals
        // smooth; shuffle so the order carries no signal
        let mut residuals = normal_quantile_sample(300);
        let mut rng = rand::rngs::StdRng::seed_from_u64(17);
        residuals.shuffle(&mut rng);

        let diag = EstimationDiagnostics::from_fit(-120.0, 2, &residuals);
        assert!(diag.residual_normality);
        assert!(!diag.heteroskedasticity);
        assert_relative_eq!(diag.aic, 4.0 + 240.0);
        assert_relative_eq!(diag.bic, 2.0 * 300.0_f64.ln() + 240.0);
    }
}
