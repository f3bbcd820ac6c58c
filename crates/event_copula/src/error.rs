//! Error types for copula configuration and sampling.

use thiserror::Error;

/// Errors raised while validating or building a copula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopulaError {
    /// A family parameter is outside its admissible range.
    #[error("invalid {family} copula parameters: {detail}")]
    InvalidParameters {
        /// Copula family name, e.g. `"clayton"`.
        family: &'static str,
        /// What is wrong with the parameters.
        detail: String,
    },

    /// The correlation matrix is malformed (not square, asymmetric, diagonal
    /// off one, or entries outside `[-1, 1]`).
    #[error("invalid correlation matrix: {detail}")]
    InvalidCorrelation {
        /// What is wrong with the matrix.
        detail: String,
    },

    /// The correlation matrix has no Cholesky factorisation.
    #[error("correlation matrix is not positive definite")]
    NotPositiveDefinite,

    /// The copula dimension does not match the number of variables.
    #[error("dimension mismatch: copula couples {expected} variables, got {got}")]
    DimensionMismatch {
        /// Dimension the copula was configured for.
        expected: usize,
        /// Dimension requested at the call site.
        got: usize,
    },
}

impl CopulaError {
    /// Convenience constructor for parameter-range failures.
    pub fn invalid_parameters(family: &'static str, detail: impl Into<String>) -> Self {
        CopulaError::InvalidParameters {
            family,
            detail: detail.into(),
        }
    }

    /// Convenience constructor for correlation-matrix failures.
    pub fn invalid_correlation(detail: impl Into<String>) -> Self {
        CopulaError::InvalidCorrelation {
            detail: detail.into(),
        }
    }
}
