//! A named, calibrated variable ready for simulation.

use event_core::types::{SamplingFrequency, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::error::{EstimationError, ModelError};
use crate::estimation::{estimate_with_frequency, ParameterEstimate};
use crate::models::{ModelParams, ModelType};

/// One simulated quantity: a predicate-addressable name, a display label,
/// and a calibrated model with its starting level.
///
/// The serialised form flattens the model tag into the variable object:
///
/// ```json
/// {
///   "name": "cpi_inflation",
///   "label": "CPI Inflation (YoY)",
///   "model": "ornstein_uhlenbeck",
///   "parameters": { "theta": 0.5, "mu": 0.025, "sigma": 0.01 },
///   "initial_value": 0.05,
///   "sampling_frequency": "monthly"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventVariable {
    /// Identifier event predicates refer to, e.g. `"cpi_inflation"`.
    pub name: String,
    /// Human-readable label for display surfaces.
    pub label: String,
    /// Model tag and calibrated parameters.
    #[serde(flatten)]
    pub parameters: ModelParams,
    /// Level simulation starts from, normally the last observation.
    pub initial_value: f64,
    /// Observation spacing the parameters were estimated at.
    #[serde(default)]
    pub sampling_frequency: SamplingFrequency,
}

impl EventVariable {
    /// Creates a validated variable.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        parameters: ModelParams,
        initial_value: f64,
        sampling_frequency: SamplingFrequency,
    ) -> Result<Self, ModelError> {
        let variable = Self {
            name: name.into(),
            label: label.into(),
            parameters,
            initial_value,
            sampling_frequency,
        };
        variable.validate()?;
        Ok(variable)
    }

    /// Calibrates the chosen model to a historical series and binds the
    /// resulting parameters to a variable starting at the last observation.
    /// Returns the variable together with the full estimation report.
    pub fn from_series(
        name: impl Into<String>,
        label: impl Into<String>,
        model: ModelType,
        series: &TimeSeries,
        frequency: SamplingFrequency,
    ) -> Result<(Self, ParameterEstimate), EstimationError> {
        let estimate = estimate_with_frequency(series, model, frequency)?;
        let variable = Self::new(name, label, estimate.parameters, series.last(), frequency)?;
        Ok((variable, estimate))
    }

    /// The model family this variable simulates under.
    pub fn model_type(&self) -> ModelType {
        self.parameters.model_type()
    }

    /// Checks the parameters and the starting level.
    ///
    /// Multiplicative models (GBM, Heston, Merton) evolve the level through
    /// exponential factors, so their starting level must be strictly
    /// positive; the mean-reverting OU level may start anywhere finite.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.parameters.validate()?;
        if !self.initial_value.is_finite() {
            return Err(ModelError::invalid(
                "initial_value",
                self.initial_value,
                "finite",
            ));
        }
        let multiplicative = matches!(
            self.model_type(),
            ModelType::Gbm | ModelType::Heston | ModelType::MertonJump
        );
        if multiplicative && self.initial_value <= 0.0 {
            return Err(ModelError::invalid(
                "initial_value",
                self.initial_value,
                "strictly positive for multiplicative models",
            ));
        }
        Ok(())
    }
}
