//! Model-dispatched estimation entry points.
//!
//! One call turns a validated [`TimeSeries`] into a [`ParameterEstimate`]:
//! the series is transformed into the observation sequence each model fits
//! on (log-returns for the multiplicative models, raw levels for OU), the
//! model's closed-form estimator runs, and the fit is wrapped with
//! per-parameter intervals and diagnostics.

use event_core::types::{SamplingFrequency, TimeSeries};

use crate::error::EstimationError;
use crate::estimation::diagnostics::EstimationDiagnostics;
use crate::estimation::inference::{self, InferenceMethod};
use crate::estimation::result::{ParameterEstimate, ParameterInterval};
use crate::models::{gbm, heston, merton, ornstein_uhlenbeck, ModelParams, ModelType};

/// Fits `model` to `series` under the default daily sampling frequency.
///
/// # Errors
///
/// Everything [`estimate_with_frequency`] raises.
pub fn estimate(series: &TimeSeries, model: ModelType) -> Result<ParameterEstimate, EstimationError> {
    estimate_with_frequency(series, model, SamplingFrequency::default())
}

/// Fits `model` to `series` observed at the given sampling frequency.
///
/// The frequency fixes the year-fraction `dt` between observations, so the
/// returned parameters are annualised regardless of how the history was
/// sampled.
///
/// # Errors
///
/// - [`EstimationError::InsufficientData`] when the observation sequence is
///   shorter than the model's estimator requires
/// - [`EstimationError::Data`] when a multiplicative model is fitted to a
///   series with non-positive levels
/// - [`EstimationError::DegenerateFit`] when the underlying regression
///   cannot be solved
pub fn estimate_with_frequency(
    series: &TimeSeries,
    model: ModelType,
    frequency: SamplingFrequency,
) -> Result<ParameterEstimate, EstimationError> {
    let dt = frequency.dt();

    let (parameters, log_likelihood, residuals) = match model {
        ModelType::Gbm => {
            let fit = gbm::estimate(&series.log_returns()?, dt)?;
            (ModelParams::Gbm(fit.params), fit.log_likelihood, fit.residuals)
        }
        ModelType::OrnsteinUhlenbeck => {
            let fit = ornstein_uhlenbeck::estimate(series.values(), dt)?;
            (
                ModelParams::OrnsteinUhlenbeck(fit.params),
                fit.log_likelihood,
                fit.residuals,
            )
        }
        ModelType::Heston => {
            let fit = heston::estimate(&series.log_returns()?, dt)?;
            (ModelParams::Heston(fit.params), fit.log_likelihood, fit.residuals)
        }
        ModelType::MertonJump => {
            let fit = merton::estimate(&series.log_returns()?, dt)?;
            (
                ModelParams::MertonJump(fit.params),
                fit.log_likelihood,
                fit.residuals,
            )
        }
    };

    let n = residuals.len();
    let method = InferenceMethod::default();
    let intervals = parameters
        .named_values()
        .into_iter()
        .map(|(name, value)| {
            let std_error = method.standard_error(value, n);
            let (ci_low, ci_high) = inference::confidence_interval(value, std_error);
            ParameterInterval {
                name: name.to_string(),
                estimate: value,
                std_error,
                ci_low,
                ci_high,
            }
        })
        .collect();

    let diagnostics =
        EstimationDiagnostics::from_fit(log_likelihood, parameters.parameter_count(), &residuals);

    Ok(ParameterEstimate {
        parameters,
        intervals,
        diagnostics,
        n_observations: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn growth_series(n: usize) -> TimeSeries {
        // exponential growth with alternating return noise
        let mut level = 100.0;
        let mut values = Vec::with_capacity(n);
        for i in 0..n {
            values.push(level);
            let r: f64 = 0.0004 + if i % 2 == 0 { 0.008 } else { -0.008 };
            level *= r.exp();
        }
        TimeSeries::from_values(values).unwrap()
    }

    #[test]
    fn test_gbm_estimate_shapes_report() {
        let series = growth_series(252);
        let report = estimate(&series, ModelType::Gbm).unwrap();

        assert_eq!(report.parameters.model_type(), ModelType::Gbm);
        assert_eq!(report.n_observations, 251);
        assert_eq!(report.intervals.len(), 2);
        assert_eq!(report.intervals[0].name, "mu");
        assert_eq!(report.intervals[1].name, "sigma");

        let sigma = report.interval("sigma").unwrap();
        assert!(sigma.ci_low <= sigma.estimate && sigma.estimate <= sigma.ci_high);
        // alternating ±0.008 daily noise annualises near 0.008·√252
        assert_relative_eq!(sigma.estimate, 0.008 * 252.0_f64.sqrt(), max_relative = 0.02);
    }

    #[test]
    fn test_default_frequency_is_daily() {
        let series = growth_series(100);
        let daily = estimate_with_frequency(&series, ModelType::Gbm, SamplingFrequency::Daily)
            .unwrap();
        let default = estimate(&series, ModelType::Gbm).unwrap();
        assert_eq!(daily.parameters, default.parameters);
    }

    #[test]
    fn test_frequency_changes_annualisation() {
        let series = growth_series(120);
        let daily = estimate_with_frequency(&series, ModelType::Gbm, SamplingFrequency::Daily)
            .unwrap();
        let monthly =
            estimate_with_frequency(&series, ModelType::Gbm, SamplingFrequency::Monthly).unwrap();

        let sigma_d = daily.interval("sigma").unwrap().estimate;
        let sigma_m = monthly.interval("sigma").unwrap().estimate;
        // σ scales with √(periods per year)
        assert_relative_eq!(sigma_d / sigma_m, (252.0_f64 / 12.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_ou_fits_on_levels_and_allows_negatives() {
        // a decaying oscillation around zero crosses into negative territory,
        // which would be rejected by any log-return transformation
        let values: Vec<f64> = (0..60)
            .map(|i| 0.04 * (-(i as f64) / 30.0).exp() * if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let series = TimeSeries::from_values(values).unwrap();

        let report =
            estimate_with_frequency(&series, ModelType::OrnsteinUhlenbeck, SamplingFrequency::Monthly)
                .unwrap();
        assert_eq!(report.parameters.model_type(), ModelType::OrnsteinUhlenbeck);
        assert_eq!(report.n_observations, 59);
        assert!(report.interval("theta").unwrap().estimate > 0.0);
    }

    #[test]
    fn test_merton_picks_up_seeded_jump() {
        let mut level = 100.0;
        let mut values = Vec::with_capacity(400);
        for i in 0..400 {
            values.push(level);
            let mut r = if i % 2 == 0 { 0.004 } else { -0.004 };
            if i == 200 {
                r = -0.15;
            }
            level *= f64::exp(r);
        }
        let series = TimeSeries::from_values(values).unwrap();

        let report = estimate(&series, ModelType::MertonJump).unwrap();
        let lambda = report.interval("lambda").unwrap().estimate;
        assert!(lambda > 0.0, "the seeded crash must register as a jump");
    }

    #[test]
    fn test_insufficient_data_propagates() {
        let series = TimeSeries::from_values(vec![100.0, 101.0]).unwrap();
        // one return is not enough for the return-based estimators
        assert!(estimate(&series, ModelType::Gbm)
            .unwrap_err()
            .is_insufficient_data());
        // two levels are not enough for the AR(1) regression
        assert!(estimate(&series, ModelType::OrnsteinUhlenbeck)
            .unwrap_err()
            .is_insufficient_data());
    }

    #[test]
    fn test_non_positive_levels_rejected_for_multiplicative_models() {
        let series = TimeSeries::from_values(vec![100.0, 0.0, 101.0]).unwrap();
        let err = estimate(&series, ModelType::Gbm).unwrap_err();
        assert!(matches!(err, EstimationError::Data(_)));
        assert!(!err.is_insufficient_data());
    }

    #[test]
    fn test_two_point_residuals_fail_normality() {
        let series = growth_series(252);
        let report = estimate(&series, ModelType::Gbm).unwrap();
        // residuals alternate between two values, far from Gaussian
        assert!(!report.diagnostics.residual_normality);
        assert!(report.diagnostics.convergence);
        assert!(report.diagnostics.bic > report.diagnostics.aic);
    }
}
