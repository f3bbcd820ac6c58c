//! Error types for simulation configuration and execution.

use event_copula::CopulaError;
use event_models::ModelError;
use thiserror::Error;

use crate::config::{MAX_HORIZON_MONTHS, MAX_SCENARIOS, MIN_SCENARIOS};

/// A simulation configuration field is outside its admissible range.
///
/// Raised by [`SimulationConfig::validate`](crate::config::SimulationConfig::validate)
/// and by the builder before a config is handed to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Scenario count outside the supported range.
    #[error(
        "invalid scenario count {got}: must be in range [{min}, {max}]",
        min = MIN_SCENARIOS,
        max = MAX_SCENARIOS
    )]
    InvalidScenarioCount {
        /// Requested scenario count.
        got: u32,
    },

    /// Horizon of zero months or beyond the supported maximum.
    #[error(
        "invalid horizon {got_months} months: must be in range [1, {max}]",
        max = MAX_HORIZON_MONTHS
    )]
    InvalidHorizon {
        /// Requested horizon in months.
        got_months: u32,
    },

    /// Only monthly stepping is implemented.
    #[error("unsupported step of {months} months: scenarios advance in 1-month steps")]
    UnsupportedStep {
        /// Requested step width in months.
        months: u32,
    },

    /// The event's horizon and the simulation horizon disagree.
    ///
    /// Both carry a horizon so each is self-describing in serialised form;
    /// the engine refuses to guess which one the caller meant.
    #[error(
        "event horizon of {event_months} months does not match configured horizon of {config_months} months"
    )]
    HorizonMismatch {
        /// Horizon stated on the event definition.
        event_months: u32,
        /// Horizon stated on the simulation config.
        config_months: u32,
    },
}

/// Errors raised while validating inputs or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// An event condition names a variable that was not supplied.
    #[error("event references unknown variable `{variable}`")]
    InvalidEventReference {
        /// The unknown variable name.
        variable: String,
    },

    /// A compound event with an empty condition list.
    #[error("compound event has no conditions")]
    EmptyCompound,

    /// No variables were supplied to simulate.
    #[error("no variables to simulate")]
    NoVariables,

    /// Two supplied variables share a name, so event references would be
    /// ambiguous.
    #[error("duplicate variable name `{variable}`")]
    DuplicateVariable {
        /// The name that appears more than once.
        variable: String,
    },

    /// The run was cancelled before all scenarios completed.
    #[error("simulation aborted after {completed_scenarios} scenarios")]
    Aborted {
        /// Scenarios fully evaluated before the cancellation was observed.
        completed_scenarios: u32,
    },

    /// The simulation configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The copula configuration is invalid or cannot be factorised at the
    /// requested dimension.
    #[error(transparent)]
    Copula(#[from] CopulaError),

    /// A variable's model parameters or starting level are invalid.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SimulationError {
    /// True when the run stopped because of a cancellation request rather
    /// than an input problem.
    pub fn is_aborted(&self) -> bool {
        matches!(self, SimulationError::Aborted { .. })
    }
}
