//! Tail-dependence coefficients derived from copula parameters.
//!
//! The coefficients are analytic functions of the family parameters, not
//! stored attributes: `λ_L = 2^(-1/θ)` for Clayton, `λ_U = 2 - 2^(1/θ)` for
//! Gumbel, and the symmetric Student-t coefficient
//! `λ = 2·t_{ν+1}(-√((ν+1)(1-ρ)/(1+ρ)))`. The Gaussian copula is
//! asymptotically independent in both tails for any `ρ < 1`.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::CopulaError;

/// Pairwise tail-dependence coefficients.
///
/// `lower` is `lim_{q→0⁺} P(U₂ ≤ q | U₁ ≤ q)`, the probability mass the
/// copula concentrates in joint crashes; `upper` is the mirrored joint-boom
/// limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailDependence {
    /// Lower-tail coefficient λ_L.
    pub lower: f64,
    /// Upper-tail coefficient λ_U.
    pub upper: f64,
}

impl TailDependence {
    /// Asymptotic independence in both tails.
    pub const NONE: TailDependence = TailDependence {
        lower: 0.0,
        upper: 0.0,
    };
}

/// Clayton coefficients: lower-tail clustering only.
pub fn clayton(theta: f64) -> TailDependence {
    TailDependence {
        lower: 2.0_f64.powf(-1.0 / theta),
        upper: 0.0,
    }
}

/// Gumbel coefficients: upper-tail clustering only. `θ = 1` is independence
/// and yields zero.
pub fn gumbel(theta: f64) -> TailDependence {
    TailDependence {
        lower: 0.0,
        upper: 2.0 - 2.0_f64.powf(1.0 / theta),
    }
}

/// Student-t coefficients, symmetric in both tails.
///
/// # Errors
///
/// [`CopulaError::InvalidParameters`] when `ν + 1` does not define a valid
/// t-distribution.
pub fn student_t(rho: f64, nu: f64) -> Result<TailDependence, CopulaError> {
    if rho <= -1.0 {
        // the quantile argument diverges; the limit is zero
        return Ok(TailDependence::NONE);
    }
    let dist = StudentsT::new(0.0, 1.0, nu + 1.0)
        .map_err(|e| CopulaError::invalid_parameters("student_t", e.to_string()))?;
    let arg = -((nu + 1.0) * (1.0 - rho) / (1.0 + rho)).sqrt();
    let lambda = 2.0 * dist.cdf(arg);
    Ok(TailDependence {
        lower: lambda,
        upper: lambda,
    })
}
