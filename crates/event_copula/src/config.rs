//! Copula family configuration and validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CopulaError;
use crate::tail::{self, TailDependence};

/// Upper bound on the Archimedean dependence parameter.
///
/// Past this the conditional-distribution powers leave the representable
/// `f64` range at the uniform floor, and the implied tail dependence is
/// already above 0.96.
pub const ARCHIMEDEAN_THETA_MAX: f64 = 20.0;

/// Student-t degrees of freedom must exceed this so the copula has finite
/// variance and a defined correlation matrix.
pub const STUDENT_T_MIN_DF: f64 = 2.0;

/// The supported copula families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopulaFamily {
    /// Elliptical, no tail dependence.
    Gaussian,
    /// Elliptical with symmetric tail dependence.
    StudentT,
    /// Archimedean, lower-tail dependent.
    Clayton,
    /// Archimedean, upper-tail dependent.
    Gumbel,
}

impl CopulaFamily {
    /// Canonical snake_case name, as used in serialised form.
    pub const fn name(self) -> &'static str {
        match self {
            CopulaFamily::Gaussian => "gaussian",
            CopulaFamily::StudentT => "student_t",
            CopulaFamily::Clayton => "clayton",
            CopulaFamily::Gumbel => "gumbel",
        }
    }
}

impl fmt::Display for CopulaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully-specified copula: family tag plus its parameters.
///
/// The elliptical families carry a single pairwise correlation `ρ`,
/// expanded to an equicorrelated k×k matrix when a sampler is built for k
/// variables; the Archimedean families carry one dependence parameter `θ`.
/// Either way the configuration is dimension-free and couples however many
/// variables the event references.
///
/// ```json
/// { "family": "student_t", "rho": 0.6, "degrees_of_freedom": 5.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum CopulaConfig {
    /// Gaussian copula with constant pairwise correlation.
    Gaussian {
        /// Pairwise shock correlation, in (−1, 1).
        rho: f64,
    },
    /// Student-t copula: correlated shocks with a shared heavy-tail mixer.
    StudentT {
        /// Pairwise shock correlation, in (−1, 1).
        rho: f64,
        /// Degrees of freedom ν, strictly above [`STUDENT_T_MIN_DF`].
        degrees_of_freedom: f64,
    },
    /// Clayton copula with dependence parameter θ ∈ (0, 20].
    Clayton {
        /// Dependence strength.
        theta: f64,
    },
    /// Gumbel copula with dependence parameter θ ∈ [1, 20].
    Gumbel {
        /// Dependence strength; 1 is independence.
        theta: f64,
    },
}

impl CopulaConfig {
    /// The family tag of this configuration.
    pub const fn family(&self) -> CopulaFamily {
        match self {
            CopulaConfig::Gaussian { .. } => CopulaFamily::Gaussian,
            CopulaConfig::StudentT { .. } => CopulaFamily::StudentT,
            CopulaConfig::Clayton { .. } => CopulaFamily::Clayton,
            CopulaConfig::Gumbel { .. } => CopulaFamily::Gumbel,
        }
    }

    /// Validates the family parameters.
    ///
    /// A pairwise ρ in (−1, 1) can still yield a non-positive-definite
    /// equicorrelated matrix for k ≥ 3 (ρ below −1/(k−1)); that is caught at
    /// sampler build time, when the dimension is known.
    ///
    /// # Errors
    ///
    /// [`CopulaError::InvalidParameters`] for out-of-range `ρ`, `θ` or `ν`.
    pub fn validate(&self) -> Result<(), CopulaError> {
        match *self {
            CopulaConfig::Gaussian { rho } => check_rho(CopulaFamily::Gaussian, rho),
            CopulaConfig::StudentT {
                rho,
                degrees_of_freedom,
            } => {
                check_rho(CopulaFamily::StudentT, rho)?;
                if !(degrees_of_freedom.is_finite() && degrees_of_freedom > STUDENT_T_MIN_DF) {
                    return Err(CopulaError::invalid_parameters(
                        "student_t",
                        format!(
                            "degrees_of_freedom = {degrees_of_freedom} must exceed {STUDENT_T_MIN_DF}"
                        ),
                    ));
                }
                Ok(())
            }
            CopulaConfig::Clayton { theta } => {
                if !(theta.is_finite() && theta > 0.0 && theta <= ARCHIMEDEAN_THETA_MAX) {
                    return Err(CopulaError::invalid_parameters(
                        "clayton",
                        format!("theta = {theta} must lie in (0, {ARCHIMEDEAN_THETA_MAX}]"),
                    ));
                }
                Ok(())
            }
            CopulaConfig::Gumbel { theta } => {
                if !(theta.is_finite() && theta >= 1.0 && theta <= ARCHIMEDEAN_THETA_MAX) {
                    return Err(CopulaError::invalid_parameters(
                        "gumbel",
                        format!("theta = {theta} must lie in [1, {ARCHIMEDEAN_THETA_MAX}]"),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Tail-dependence coefficients implied by the parameters.
    ///
    /// Every family here is exchangeable, so one coefficient pair covers
    /// all variable pairs. The Gaussian copula is asymptotically
    /// independent and always reports zero.
    ///
    /// # Errors
    ///
    /// [`CopulaError::InvalidParameters`] if the implied t-distribution is
    /// invalid.
    pub fn tail_dependence(&self) -> Result<TailDependence, CopulaError> {
        match *self {
            CopulaConfig::Gaussian { .. } => Ok(TailDependence::NONE),
            CopulaConfig::StudentT {
                rho,
                degrees_of_freedom,
            } => tail::student_t(rho, degrees_of_freedom),
            CopulaConfig::Clayton { theta } => Ok(tail::clayton(theta)),
            CopulaConfig::Gumbel { theta } => Ok(tail::gumbel(theta)),
        }
    }
}

fn check_rho(family: CopulaFamily, rho: f64) -> Result<(), CopulaError> {
    if !(rho.is_finite() && rho > -1.0 && rho < 1.0) {
        return Err(CopulaError::invalid_parameters(
            family.name(),
            format!("rho = {rho} must lie in (-1, 1)"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validation_ranges() {
        assert!(CopulaConfig::Clayton { theta: 2.0 }.validate().is_ok());
        assert!(CopulaConfig::Clayton { theta: 0.0 }.validate().is_err());
        assert!(CopulaConfig::Clayton { theta: -1.0 }.validate().is_err());
        assert!(CopulaConfig::Clayton { theta: 25.0 }.validate().is_err());

        assert!(CopulaConfig::Gumbel { theta: 1.0 }.validate().is_ok());
        assert!(CopulaConfig::Gumbel { theta: 0.9 }.validate().is_err());

        assert!(CopulaConfig::Gaussian { rho: 0.0 }.validate().is_ok());
        assert!(CopulaConfig::Gaussian { rho: 0.999 }.validate().is_ok());
        assert!(CopulaConfig::Gaussian { rho: 1.0 }.validate().is_err());
        assert!(CopulaConfig::Gaussian { rho: -1.0 }.validate().is_err());
        assert!(CopulaConfig::Gaussian { rho: f64::NAN }.validate().is_err());

        let config = CopulaConfig::StudentT {
            rho: 0.5,
            degrees_of_freedom: 5.0,
        };
        assert!(config.validate().is_ok());

        let config = CopulaConfig::StudentT {
            rho: 0.5,
            degrees_of_freedom: 2.0,
        };
        assert!(config.validate().is_err()); // ν must exceed 2
    }

    #[test]
    fn test_rejection_messages_name_the_family() {
        let err = CopulaConfig::Clayton { theta: -1.0 }.validate().unwrap_err();
        assert!(err.to_string().contains("clayton"));

        let err = CopulaConfig::Gaussian { rho: 2.0 }.validate().unwrap_err();
        assert!(err.to_string().contains("gaussian"));
    }

    #[test]
    fn test_tail_dependence_dispatch() {
        let clayton = CopulaConfig::Clayton { theta: 2.0 };
        let td = clayton.tail_dependence().unwrap();
        assert_relative_eq!(td.lower, 2.0_f64.powf(-0.5), epsilon = 1e-12);
        assert_eq!(td.upper, 0.0);

        let gaussian = CopulaConfig::Gaussian { rho: 0.8 };
        assert_eq!(gaussian.tail_dependence().unwrap(), TailDependence::NONE);

        let student = CopulaConfig::StudentT {
            rho: 0.8,
            degrees_of_freedom: 4.0,
        };
        let td = student.tail_dependence().unwrap();
        assert!(td.lower > 0.3, "high ρ and low ν cluster strongly: {}", td.lower);
    }

    #[test]
    fn test_serde_family_tags() {
        let config = CopulaConfig::Clayton { theta: 1.5 };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["family"], "clayton");
        assert_eq!(json["theta"], 1.5);

        let config = CopulaConfig::StudentT {
            rho: 0.6,
            degrees_of_freedom: 5.0,
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["family"], "student_t");
        assert_eq!(json["rho"], 0.6);
        assert_eq!(json["degrees_of_freedom"], 5.0);

        let back: CopulaConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_deserialises_dashboard_payload() {
        let json = r#"{
            "family": "gumbel",
            "theta": 1.8
        }"#;
        let config: CopulaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.family(), CopulaFamily::Gumbel);
        assert!(config.validate().is_ok());
    }
}
