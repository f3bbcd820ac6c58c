//! Standard errors and confidence intervals for fitted parameters.
//!
//! The inference method is carried as an explicit tag so its scale-heuristic
//! character is visible to downstream consumers rather than passed off as an
//! information-matrix standard error.

use serde::{Deserialize, Serialize};

/// Two-sided 95% critical value of the standard normal.
pub const NORMAL_CRITICAL_95: f64 = 1.96;

/// How parameter uncertainty is quantified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMethod {
    /// Scale heuristic `SE = |estimate| / sqrt(n)`.
    ///
    /// Carries the right `1/sqrt(n)` sample-size decay but ties the scale to
    /// the estimate's own magnitude, so a parameter estimated at exactly
    /// zero reports a zero-width interval. Cheap, closed-form, and labelled
    /// as what it is.
    #[default]
    RootNApproximation,
}

impl InferenceMethod {
    /// Standard error of an estimate fitted on `n` observations.
    pub fn standard_error(self, estimate: f64, n: usize) -> f64 {
        match self {
            InferenceMethod::RootNApproximation => estimate.abs() / (n as f64).sqrt(),
        }
    }
}

/// Symmetric 95% confidence interval around the estimate.
pub fn confidence_interval(estimate: f64, std_error: f64) -> (f64, f64) {
    (
        estimate - NORMAL_CRITICAL_95 * std_error,
        estimate + NORMAL_CRITICAL_95 * std_error,
    )
}
