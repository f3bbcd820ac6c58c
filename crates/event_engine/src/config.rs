//! Monte Carlo simulation configuration.
//!
//! This module provides the run-level configuration consumed by
//! [`MonteCarloEngine`](crate::simulation::MonteCarloEngine): scenario count,
//! horizon, step width, discretization scheme, and the optional master seed.
//! Dashboard requests deserialize straight into [`SimulationConfig`]; every
//! field has a default so a bare `{}` payload is a valid 10 000-scenario,
//! 12-month run.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum number of scenarios; below this the Wilson interval is too wide
/// to be worth reporting.
pub const MIN_SCENARIOS: u32 = 100;

/// Maximum number of scenarios allowed per run.
pub const MAX_SCENARIOS: u32 = 10_000_000;

/// Scenario count used when the caller does not specify one.
pub const DEFAULT_SCENARIOS: u32 = 10_000;

/// Maximum simulation horizon (50 years of monthly steps).
pub const MAX_HORIZON_MONTHS: u32 = 600;

/// Horizon used when the caller does not specify one.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Year fraction of one monthly step; annualised parameters are scaled by
/// this inside the stepping loop.
pub const STEP_DT: f64 = 1.0 / 12.0;

/// Discretization scheme for advancing the SDE state each step.
///
/// Only Milstein is implemented: at a monthly `dt` the first-order
/// Euler-Maruyama bias in the variance paths is visible in tail
/// probabilities, and the Milstein correction costs one extra
/// multiply per step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discretization {
    /// Milstein scheme (strong order 1.0).
    #[default]
    Milstein,
}

/// Simulation run configuration.
///
/// Immutable once built. Use [`SimulationConfig::builder`] to construct
/// instances, or deserialize from a request payload; both paths end in
/// [`SimulationConfig::validate`].
///
/// # Examples
///
/// ```rust
/// use event_engine::config::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .with_n_scenarios(50_000)
///     .with_horizon_months(12)
///     .with_seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_scenarios(), 50_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of scenarios to simulate.
    n_scenarios: u32,
    /// Horizon in months; the event is evaluated at this point.
    horizon_months: u32,
    /// Step width in months. Fixed at 1; carried so serialised configs are
    /// explicit about the grid they ran on.
    step_months: u32,
    /// Discretization scheme.
    discretization: Discretization,
    /// Master seed; `None` draws one from entropy per run.
    seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_scenarios: DEFAULT_SCENARIOS,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            step_months: 1,
            discretization: Discretization::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of scenarios.
    #[inline]
    pub fn n_scenarios(&self) -> u32 {
        self.n_scenarios
    }

    /// Returns the horizon in months.
    #[inline]
    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    /// Returns the step width in months.
    #[inline]
    pub fn step_months(&self) -> u32 {
        self.step_months
    }

    /// Returns the discretization scheme.
    #[inline]
    pub fn discretization(&self) -> Discretization {
        self.discretization
    }

    /// Returns the optional master seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Year fraction covered by one step.
    #[inline]
    pub fn dt(&self) -> f64 {
        f64::from(self.step_months) * STEP_DT
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_scenarios` is outside `[100, 10_000_000]`
    /// - `horizon_months` is 0 or greater than 600
    /// - `step_months` is anything but 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_scenarios < MIN_SCENARIOS || self.n_scenarios > MAX_SCENARIOS {
            return Err(ConfigError::InvalidScenarioCount {
                got: self.n_scenarios,
            });
        }
        if self.horizon_months == 0 || self.horizon_months > MAX_HORIZON_MONTHS {
            return Err(ConfigError::InvalidHorizon {
                got_months: self.horizon_months,
            });
        }
        if self.step_months != 1 {
            return Err(ConfigError::UnsupportedStep {
                months: self.step_months,
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Every field starts at its default, so callers only state what they
/// change. Validation happens once at build time.
///
/// # Examples
///
/// ```rust
/// use event_engine::config::{Discretization, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .with_n_scenarios(100_000)
///     .with_horizon_months(24)
///     .with_discretization(Discretization::Milstein)
///     .build()
///     .expect("valid config");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Sets the number of scenarios.
    ///
    /// # Arguments
    ///
    /// * `n_scenarios` - Scenario count in [100, 10_000_000]
    #[inline]
    pub fn with_n_scenarios(mut self, n_scenarios: u32) -> Self {
        self.config.n_scenarios = n_scenarios;
        self
    }

    /// Sets the horizon in months.
    ///
    /// # Arguments
    ///
    /// * `horizon_months` - Horizon in [1, 600]
    #[inline]
    pub fn with_horizon_months(mut self, horizon_months: u32) -> Self {
        self.config.horizon_months = horizon_months;
        self
    }

    /// Sets the step width in months. Anything but 1 is rejected at build.
    #[inline]
    pub fn with_step_months(mut self, step_months: u32) -> Self {
        self.config.step_months = step_months;
        self
    }

    /// Sets the discretization scheme.
    #[inline]
    pub fn with_discretization(mut self, discretization: Discretization) -> Self {
        self.config.discretization = discretization;
        self
    }

    /// Sets the master seed for reproducibility.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Everything [`SimulationConfig::validate`] raises.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
