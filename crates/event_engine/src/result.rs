//! Result types returned to the caller, JSON-ready for the dashboard.
//!
//! A run produces one [`EventProbabilityResult`]: the event probability with
//! its Wilson 90% interval, the dependence decomposition, and run metadata.
//! Field names here are the dashboard wire contract; rename with care.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// z-score of the two-sided 90% normal interval.
pub const WILSON_Z_90: f64 = 1.645;

/// Wilson score interval at 90% confidence for a binomial proportion.
///
/// Preferred over the Wald interval because it stays inside `[0, 1]` and
/// behaves at the extremes: zero successes give a lower bound of exactly 0
/// with a strictly positive upper bound, which is the regime rare-event
/// probabilities live in.
pub fn wilson_interval(successes: u32, trials: u32) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = f64::from(trials);
    let p = f64::from(successes) / n;
    let z = WILSON_Z_90;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    // At the extremes the exact Wilson bound is the boundary itself;
    // evaluating center -/+ half there would leave rounding residue.
    let lower = if successes == 0 {
        0.0
    } else {
        (center - half).max(0.0)
    };
    let upper = if successes == trials {
        1.0
    } else {
        (center + half).min(1.0)
    };
    (lower, upper)
}

/// Point estimate of a probability with its 90% Wilson interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEstimate {
    /// Fraction of scenarios in which the event fired.
    pub mean: f64,
    /// Wilson score interval at 90% confidence, `(lower, upper)`.
    pub ci_90: (f64, f64),
}

impl ProbabilityEstimate {
    /// Builds the estimate from raw counts.
    pub fn from_counts(successes: u32, trials: u32) -> Self {
        let mean = if trials == 0 {
            0.0
        } else {
            f64::from(successes) / f64::from(trials)
        };
        Self {
            mean,
            ci_90: wilson_interval(successes, trials),
        }
    }
}

/// How much of the joint probability is dependence-driven.
///
/// `per_variable` holds each referenced variable's marginal probability of
/// satisfying its own conditions, estimated on an independent re-simulation.
/// `joint_independent` combines those marginals as if the variables were
/// independent; `joint_copula` is the actually simulated joint probability.
/// Their ratio is the headline "dependence is costing you 1.8x" number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskDecomposition {
    /// Marginal event probability per referenced variable, keyed by name.
    pub per_variable: BTreeMap<String, f64>,
    /// Joint probability under the independence assumption.
    pub joint_independent: f64,
    /// Joint probability under the configured copula (the headline mean).
    pub joint_copula: f64,
    /// `joint_copula / joint_independent`; `None` when the denominator is
    /// exactly zero, rather than an infinity that breaks JSON.
    pub copula_risk_multiplier: Option<f64>,
}

/// Complete output of one simulation run.
///
/// Serialises to the dashboard payload:
///
/// ```json
/// {
///   "probability": { "mean": 0.023, "ci_90": [0.0206, 0.0256] },
///   "decomposition": {
///     "per_variable": { "cpi_inflation": 0.031, "gdp_growth": 0.12 },
///     "joint_independent": 0.0037,
///     "joint_copula": 0.0230,
///     "copula_risk_multiplier": 6.2
///   },
///   "n_scenarios": 100000,
///   "computation_time_ms": 412
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventProbabilityResult {
    /// The event probability with its confidence interval.
    pub probability: ProbabilityEstimate,
    /// Dependence decomposition of the joint probability.
    pub decomposition: RiskDecomposition,
    /// Scenarios evaluated.
    pub n_scenarios: u32,
    /// Wall-clock duration of the run in milliseconds.
    pub computation_time_ms: u64,
}

impl EventProbabilityResult {
    /// Serialises to compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialises to pretty-printed JSON for logs and fixtures.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wilson_zero_successes() {
        let (lower, upper) = wilson_interval(0, 1_000);
        assert_eq!(lower, 0.0);
        assert!(upper > 0.0);
        // Exact form at p = 0: upper = z^2 / (n + z^2)
        let z2 = WILSON_Z_90 * WILSON_Z_90;
        assert_relative_eq!(upper, z2 / (1_000.0 + z2), epsilon = 1e-12);
    }

    #[test]
    fn test_wilson_all_successes() {
        let (lower, upper) = wilson_interval(500, 500);
        assert_eq!(upper, 1.0);
        assert!(lower < 1.0);
        assert!(lower > 0.9);
    }

    #[test]
    fn test_wilson_zero_trials() {
        assert_eq!(wilson_interval(0, 0), (0.0, 1.0));
    }

    #[test]
    fn test_wilson_half_is_centered() {
        let (lower, upper) = wilson_interval(50, 100);
        // At p = 0.5 the Wilson center collapses to 0.5 exactly.
        assert_relative_eq!(lower, 0.418841, epsilon = 1e-4);
        assert_relative_eq!(upper, 0.581159, epsilon = 1e-4);
        assert_relative_eq!(lower + upper, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wilson_strictly_contains_interior_mean() {
        for (successes, trials) in [(1, 100), (23, 1_000), (9_999, 10_000)] {
            let p = f64::from(successes) / f64::from(trials);
            let (lower, upper) = wilson_interval(successes, trials);
            assert!(lower < p && p < upper, "({successes}, {trials})");
        }
    }

    #[test]
    fn test_wilson_width_shrinks_with_trials() {
        let narrow = wilson_interval(500, 10_000);
        let wide = wilson_interval(50, 1_000);
        assert!(narrow.1 - narrow.0 < wide.1 - wide.0);
    }

    #[test]
    fn test_estimate_from_counts() {
        let estimate = ProbabilityEstimate::from_counts(230, 10_000);
        assert_relative_eq!(estimate.mean, 0.023, epsilon = 1e-12);
        assert!(estimate.ci_90.0 < estimate.mean && estimate.mean < estimate.ci_90.1);

        let empty = ProbabilityEstimate::from_counts(0, 0);
        assert_eq!(empty.mean, 0.0);
        assert_eq!(empty.ci_90, (0.0, 1.0));
    }

    #[test]
    fn test_result_json_shape() {
        let mut per_variable = BTreeMap::new();
        per_variable.insert("cpi_inflation".to_string(), 0.031);
        per_variable.insert("gdp_growth".to_string(), 0.12);
        let result = EventProbabilityResult {
            probability: ProbabilityEstimate::from_counts(230, 10_000),
            decomposition: RiskDecomposition {
                per_variable,
                joint_independent: 0.00372,
                joint_copula: 0.023,
                copula_risk_multiplier: Some(0.023 / 0.00372),
            },
            n_scenarios: 10_000,
            computation_time_ms: 412,
        };

        let json: serde_json::Value =
            serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["probability"]["mean"], 0.023);
        assert!(json["probability"]["ci_90"].is_array());
        assert_eq!(json["decomposition"]["per_variable"]["gdp_growth"], 0.12);
        assert_eq!(json["n_scenarios"], 10_000);
        assert_eq!(json["computation_time_ms"], 412);

        let back: EventProbabilityResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_null_multiplier_serialises_as_null() {
        let decomposition = RiskDecomposition {
            per_variable: BTreeMap::new(),
            joint_independent: 0.0,
            joint_copula: 0.0,
            copula_risk_multiplier: None,
        };
        let json = serde_json::to_value(&decomposition).unwrap();
        assert!(json["copula_risk_multiplier"].is_null());
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // (successes, trials) with successes <= trials
        fn counts_strategy() -> impl Strategy<Value = (u32, u32)> {
            (1u32..1_000_000).prop_flat_map(|trials| (0..=trials, Just(trials)))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            /// The interval stays inside [0, 1] and contains the point estimate.
            #[test]
            fn prop_wilson_contains_estimate((successes, trials) in counts_strategy()) {
                let p = f64::from(successes) / f64::from(trials);
                let (lower, upper) = wilson_interval(successes, trials);
                prop_assert!((0.0..=1.0).contains(&lower));
                prop_assert!((0.0..=1.0).contains(&upper));
                prop_assert!(
                    lower <= p && p <= upper,
                    "estimate {} outside [{}, {}] for {}/{}",
                    p, lower, upper, successes, trials
                );
                prop_assert!(lower < upper);
            }

            /// Swapping successes and failures mirrors the interval around 1/2.
            #[test]
            fn prop_wilson_symmetric((successes, trials) in counts_strategy()) {
                let (lower, upper) = wilson_interval(successes, trials);
                let (m_lower, m_upper) = wilson_interval(trials - successes, trials);
                prop_assert!((lower - (1.0 - m_upper)).abs() < 1e-12);
                prop_assert!((upper - (1.0 - m_lower)).abs() < 1e-12);
            }

            /// More successes never move either bound down.
            #[test]
            fn prop_wilson_monotone_in_successes(
                (successes, trials) in counts_strategy()
            ) {
                prop_assume!(successes < trials);
                let (lower, upper) = wilson_interval(successes, trials);
                let (next_lower, next_upper) = wilson_interval(successes + 1, trials);
                prop_assert!(next_lower >= lower - 1e-15);
                prop_assert!(next_upper >= upper - 1e-15);
            }
        }
    }
}
