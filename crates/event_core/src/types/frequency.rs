//! Sampling frequency of a historical series and its annualisation factor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a historical series is observed.
///
/// The frequency fixes the year-fraction `dt` between consecutive
/// observations, which the estimators use to annualise drift and volatility.
/// Daily series use the 252-trading-day convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingFrequency {
    /// Trading-daily observations (252 per year).
    #[default]
    Daily,
    /// Weekly observations (52 per year).
    Weekly,
    /// Monthly observations (12 per year).
    Monthly,
    /// Quarterly observations (4 per year).
    Quarterly,
    /// Annual observations.
    Annual,
}

impl SamplingFrequency {
    /// Number of observations per year under this frequency.
    pub const fn periods_per_year(self) -> f64 {
        match self {
            SamplingFrequency::Daily => 252.0,
            SamplingFrequency::Weekly => 52.0,
            SamplingFrequency::Monthly => 12.0,
            SamplingFrequency::Quarterly => 4.0,
            SamplingFrequency::Annual => 1.0,
        }
    }

    /// Year fraction between consecutive observations (`1 / periods_per_year`).
    pub fn dt(self) -> f64 {
        1.0 / self.periods_per_year()
    }
}

impl fmt::Display for SamplingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingFrequency::Daily => "daily",
            SamplingFrequency::Weekly => "weekly",
            SamplingFrequency::Monthly => "monthly",
            SamplingFrequency::Quarterly => "quarterly",
            SamplingFrequency::Annual => "annual",
        };
        write!(f, "{}", name)
    }
}
