//! Structured error types for input data validation.

use thiserror::Error;

/// Errors raised while validating historical observation data.
///
/// Construction of a [`crate::types::TimeSeries`] checks its invariants
/// eagerly, so downstream numeric code can assume a well-formed series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The series contains no observations.
    #[error("series is empty")]
    Empty,

    /// The series has fewer observations than the operation requires.
    #[error("series too short: got {got} observations, need at least {need}")]
    TooShort {
        /// Number of observations supplied.
        got: usize,
        /// Minimum number of observations required.
        need: usize,
    },

    /// An observation is NaN or infinite.
    #[error("non-finite observation at index {index}")]
    NonFinite {
        /// Zero-based position of the offending observation.
        index: usize,
    },

    /// Date stamps are not strictly increasing.
    #[error("observation dates not strictly increasing at index {index}")]
    OutOfOrder {
        /// Zero-based position of the first out-of-order date.
        index: usize,
    },

    /// An observation is zero or negative where positivity is required
    /// (log-returns are only defined for positive series).
    #[error("non-positive observation at index {index}: log-returns require positive values")]
    NonPositive {
        /// Zero-based position of the offending observation.
        index: usize,
    },
}

impl DataError {
    /// Returns true if the error indicates too little data rather than
    /// malformed data.
    pub fn is_insufficient(&self) -> bool {
        matches!(self, DataError::Empty | DataError::TooShort { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(DataError::Empty.to_string(), "series is empty");
        assert_eq!(
            DataError::TooShort { got: 1, need: 2 }.to_string(),
            "series too short: got 1 observations, need at least 2"
        );
        assert_eq!(
            DataError::NonFinite { index: 3 }.to_string(),
            "non-finite observation at index 3"
        );
    }

    #[test]
    fn test_is_insufficient() {
        assert!(DataError::Empty.is_insufficient());
        assert!(DataError::TooShort { got: 1, need: 2 }.is_insufficient());
        assert!(!DataError::NonFinite { index: 0 }.is_insufficient());
        assert!(!DataError::OutOfOrder { index: 1 }.is_insufficient());
    }
}
