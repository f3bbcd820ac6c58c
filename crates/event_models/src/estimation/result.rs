//! The estimation report returned to callers.

use serde::{Deserialize, Serialize};

use crate::estimation::diagnostics::EstimationDiagnostics;
use crate::models::ModelParams;

/// Point estimate, standard error, and 95% confidence interval for one
/// named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInterval {
    /// Parameter name in the model schema, e.g. `"sigma"`.
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error under the reported inference method.
    pub std_error: f64,
    /// Lower 95% confidence bound.
    pub ci_low: f64,
    /// Upper 95% confidence bound.
    pub ci_high: f64,
}

/// Complete report of one model fit: the calibrated parameters, per-parameter
/// uncertainty, and fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEstimate {
    /// The calibrated model, tagged by family.
    #[serde(flatten)]
    pub parameters: ModelParams,
    /// One interval per parameter, in schema order.
    pub intervals: Vec<ParameterInterval>,
    /// Goodness-of-fit verdicts.
    pub diagnostics: EstimationDiagnostics,
    /// Observations the fit was scored on (returns or regression pairs).
    pub n_observations: usize,
}

impl ParameterEstimate {
    /// Looks up the interval for a parameter by name.
    pub fn interval(&self, name: &str) -> Option<&ParameterInterval> {
        self.intervals.iter().find(|interval| interval.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GbmParams;

    fn report() -> ParameterEstimate {
        ParameterEstimate {
            parameters: ModelParams::Gbm(GbmParams::new(0.05, 0.2).unwrap()),
            intervals: vec![
                ParameterInterval {
                    name: "mu".to_string(),
                    estimate: 0.05,
                    std_error: 0.005,
                    ci_low: 0.0402,
                    ci_high: 0.0598,
                },
                ParameterInterval {
                    name: "sigma".to_string(),
                    estimate: 0.2,
                    std_error: 0.02,
                    ci_low: 0.1608,
                    ci_high: 0.2392,
                },
            ],
            diagnostics: EstimationDiagnostics::from_fit(-250.0, 2, &[0.1, -0.1, 0.05]),
            n_observations: 100,
        }
    }

    #[test]
    fn test_interval_lookup() {
        let report = report();
        assert_eq!(report.interval("sigma").unwrap().estimate, 0.2);
        assert!(report.interval("kappa").is_none());
    }

    #[test]
    fn test_serialises_with_flattened_model() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["model"], "gbm");
        assert_eq!(json["parameters"]["sigma"], 0.2);
        assert_eq!(json["intervals"][0]["name"], "mu");
        assert_eq!(json["n_observations"], 100);

        let back: ParameterEstimate = serde_json::from_value(json).unwrap();
        assert_eq!(back, report());
    }
}
