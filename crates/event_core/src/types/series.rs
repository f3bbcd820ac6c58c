//! Validated, immutable container for historical observations.
//!
//! A [`TimeSeries`] is constructed once from raw values (implicit equal
//! spacing) or from date-stamped points, validated eagerly, and never mutated
//! afterwards. Estimators consume it read-only.

use crate::types::error::DataError;
use chrono::NaiveDate;

/// Minimum number of observations needed to form a single difference or
/// return.
pub const MIN_OBSERVATIONS: usize = 2;

/// An ordered historical series of `f64` observations.
///
/// Invariants, enforced at construction:
/// - at least [`MIN_OBSERVATIONS`] observations,
/// - every observation finite,
/// - date stamps (when present) strictly increasing.
///
/// # Examples
///
/// ```rust
/// use event_core::types::TimeSeries;
///
/// let series = TimeSeries::from_values(vec![100.0, 102.0, 101.0]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.last(), 101.0);
///
/// let returns = series.log_returns().unwrap();
/// assert_eq!(returns.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    dates: Option<Vec<NaiveDate>>,
}

impl TimeSeries {
    /// Builds a series from bare values with implicit equal spacing.
    ///
    /// # Errors
    ///
    /// - [`DataError::Empty`] for an empty vector
    /// - [`DataError::TooShort`] for a single observation
    /// - [`DataError::NonFinite`] if any value is NaN or infinite
    pub fn from_values(values: Vec<f64>) -> Result<Self, DataError> {
        Self::validate_values(&values)?;
        Ok(Self {
            values,
            dates: None,
        })
    }

    /// Builds a series from date-stamped observations.
    ///
    /// Dates must be strictly increasing; the spacing itself is not
    /// inspected (estimation treats observations as equally spaced at the
    /// declared sampling frequency).
    ///
    /// # Errors
    ///
    /// Everything [`TimeSeries::from_values`] raises, plus
    /// [`DataError::OutOfOrder`] when dates repeat or decrease.
    pub fn from_dated(points: Vec<(NaiveDate, f64)>) -> Result<Self, DataError> {
        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        Self::validate_values(&values)?;
        for (i, window) in points.windows(2).enumerate() {
            if window[1].0 <= window[0].0 {
                return Err(DataError::OutOfOrder { index: i + 1 });
            }
        }
        let dates = points.into_iter().map(|(d, _)| d).collect();
        Ok(Self {
            values,
            dates: Some(dates),
        })
    }

    fn validate_values(values: &[f64]) -> Result<(), DataError> {
        if values.is_empty() {
            return Err(DataError::Empty);
        }
        if values.len() < MIN_OBSERVATIONS {
            return Err(DataError::TooShort {
                got: values.len(),
                need: MIN_OBSERVATIONS,
            });
        }
        for (index, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(DataError::NonFinite { index });
            }
        }
        Ok(())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty series. Provided for
    /// slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The observations, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Date stamps, when the series was built with [`TimeSeries::from_dated`].
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// First (oldest) observation.
    pub fn first(&self) -> f64 {
        self.values[0]
    }

    /// Last (most recent) observation.
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Log-returns `ln(x_t / x_{t-1})`, one fewer than the observation count.
    ///
    /// # Errors
    ///
    /// [`DataError::NonPositive`] if any observation is zero or negative.
    pub fn log_returns(&self) -> Result<Vec<f64>, DataError> {
        for (index, v) in self.values.iter().enumerate() {
            if *v <= 0.0 {
                return Err(DataError::NonPositive { index });
            }
        }
        Ok(self
            .values
            .windows(2)
            .map(|w| (w[1] / w[0]).ln())
            .collect())
    }

    /// First differences `x_t - x_{t-1}`, one fewer than the observation
    /// count. Defined for any finite series.
    pub fn differences(&self) -> Vec<f64> {
        self.values.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
