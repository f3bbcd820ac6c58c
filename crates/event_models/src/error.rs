//! Error types for model validation and parameter estimation.

use event_core::types::DataError;
use thiserror::Error;

/// A model parameter violates its admissible range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A single parameter is outside its admissible range.
    #[error("invalid parameter {name} = {value}: must be {constraint}")]
    InvalidParameter {
        /// Parameter name as it appears in the model schema.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable constraint, e.g. "positive and finite".
        constraint: &'static str,
    },
}

impl ModelError {
    /// Convenience constructor for the common case.
    pub fn invalid(name: &'static str, value: f64, constraint: &'static str) -> Self {
        ModelError::InvalidParameter {
            name,
            value,
            constraint,
        }
    }
}

/// Errors raised while fitting a model to a historical series.
///
/// Estimation never silently falls back to defaults: every failure is
/// surfaced so the caller can correct the input and retry. No caller-visible
/// state is mutated before an error is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// Too few usable observations to estimate the model.
    #[error("insufficient data: got {got} usable observations, need at least {need}")]
    InsufficientData {
        /// Usable observations available after differencing.
        got: usize,
        /// Minimum required by the estimator.
        need: usize,
    },

    /// The regression underlying the fit produced non-finite or out-of-range
    /// coefficients.
    #[error("degenerate fit: {detail}")]
    DegenerateFit {
        /// What degenerated, e.g. "zero variance in lagged levels".
        detail: String,
    },

    /// The input series itself is malformed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The fitted parameters failed model validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl EstimationError {
    /// Degenerate-fit constructor taking anything displayable.
    pub fn degenerate(detail: impl Into<String>) -> Self {
        EstimationError::DegenerateFit {
            detail: detail.into(),
        }
    }

    /// True when the failure is a data-quantity problem rather than a
    /// numerical one.
    pub fn is_insufficient_data(&self) -> bool {
        match self {
            EstimationError::InsufficientData { .. } => true,
            EstimationError::Data(e) => e.is_insufficient(),
            _ => false,
        }
    }

    /// True for degenerate-regression failures.
    pub fn is_degenerate_fit(&self) -> bool {
        matches!(self, EstimationError::DegenerateFit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::invalid("sigma", -0.2, "positive and finite");
        assert_eq!(
            err.to_string(),
            "invalid parameter sigma = -0.2: must be positive and finite"
        );
    }

    #[test]
    fn test_estimation_error_display() {
        let err = EstimationError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 1 usable observations, need at least 2"
        );

        let err = EstimationError::degenerate("zero variance in lagged levels");
        assert_eq!(
            err.to_string(),
            "degenerate fit: zero variance in lagged levels"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(EstimationError::InsufficientData { got: 0, need: 2 }.is_insufficient_data());
        assert!(EstimationError::from(DataError::TooShort { got: 1, need: 2 })
            .is_insufficient_data());
        assert!(!EstimationError::degenerate("x").is_insufficient_data());
        assert!(EstimationError::degenerate("x").is_degenerate_fit());
    }

    #[test]
    fn test_data_error_converts() {
        let err: EstimationError = DataError::NonPositive { index: 4 }.into();
        assert!(matches!(err, EstimationError::Data(_)));
    }
}
