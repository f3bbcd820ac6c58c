//! The tagged model union and its stepping interface.
//!
//! [`ModelParams`] closes the model family into one enum so the simulation
//! loop dispatches statically, and so a calibrated variable serialises with
//! an explicit `model` tag next to its `parameters` payload:
//!
//! ```json
//! { "model": "heston", "parameters": { "mu": 0.05, "kappa": 2.0, ... } }
//! ```
//!
//! Stepping is pure: every source of randomness enters through a
//! [`StepShock`], and every model consumes the same shock layout, so paths
//! are reproducible functions of their shock stream and swapping the model
//! of one variable never shifts the randomness seen by another.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ModelError;
use crate::models::gbm::{self, GbmParams};
use crate::models::heston::{self, HestonParams};
use crate::models::merton::{self, MertonParams};
use crate::models::ornstein_uhlenbeck::{self, OuParams};

/// Discriminant of the model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Geometric Brownian motion.
    Gbm,
    /// Mean-reverting Ornstein-Uhlenbeck process (Vasicek).
    #[serde(alias = "vasicek")]
    OrnsteinUhlenbeck,
    /// Heston stochastic volatility.
    Heston,
    /// Merton jump-diffusion.
    #[serde(alias = "merton")]
    MertonJump,
}

impl ModelType {
    /// Number of free parameters in the model schema, used as the `k` of
    /// information criteria.
    pub const fn parameter_count(self) -> usize {
        match self {
            ModelType::Gbm => 2,
            ModelType::OrnsteinUhlenbeck => 3,
            ModelType::Heston => 6,
            ModelType::MertonJump => 5,
        }
    }

    /// Canonical snake_case name, as used in serialised form.
    pub const fn name(self) -> &'static str {
        match self {
            ModelType::Gbm => "gbm",
            ModelType::OrnsteinUhlenbeck => "ornstein_uhlenbeck",
            ModelType::Heston => "heston",
            ModelType::MertonJump => "merton_jump",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a model-type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model type `{0}`")]
pub struct ParseModelTypeError(String);

impl FromStr for ModelType {
    type Err = ParseModelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gbm" => Ok(ModelType::Gbm),
            "ou" | "ornstein_uhlenbeck" | "vasicek" => Ok(ModelType::OrnsteinUhlenbeck),
            "heston" => Ok(ModelType::Heston),
            "merton_jump" | "merton" => Ok(ModelType::MertonJump),
            _ => Err(ParseModelTypeError(s.to_string())),
        }
    }
}

/// Per-step state of a simulated variable.
///
/// Single-factor models carry just the level; Heston also carries the
/// instantaneous variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SdeState {
    /// Level of a single-factor process.
    Single(f64),
    /// Level plus instantaneous variance of a two-factor process.
    WithVariance {
        /// Process level.
        value: f64,
        /// Instantaneous variance.
        variance: f64,
    },
}

impl SdeState {
    /// The observable level regardless of the state shape.
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            SdeState::Single(value) => value,
            SdeState::WithVariance { value, .. } => value,
        }
    }
}

/// The full set of random inputs one model step may consume.
///
/// Every model is fed the same layout each step even when it ignores some
/// fields; a shock stream therefore advances identically whichever model
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepShock {
    /// Primary diffusion shock (standard normal, possibly
    /// copula-correlated across variables).
    pub diffusion: f64,
    /// Second-factor shock (standard normal, independent of `diffusion`);
    /// drives the Heston variance innovation.
    pub second_factor: f64,
    /// Uniform(0,1) draw deciding jump arrival.
    pub jump_uniform: f64,
    /// Standard normal draw sizing a jump when one arrives.
    pub jump_size: f64,
}

impl StepShock {
    /// Draws a full shock set from `rng` in the fixed stream order:
    /// diffusion normal, second-factor normal, jump uniform, jump-size
    /// normal.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let diffusion = rng.sample(StandardNormal);
        Self::with_diffusion(diffusion, rng)
    }

    /// Builds a shock set around an externally supplied diffusion shock,
    /// drawing only the three auxiliary components from `rng`. Simulation
    /// loops that correlate the diffusion shocks across variables use this
    /// so the auxiliary stream layout stays identical to [`Self::draw`].
    pub fn with_diffusion<R: Rng + ?Sized>(diffusion: f64, rng: &mut R) -> Self {
        Self {
            diffusion,
            second_factor: rng.sample(StandardNormal),
            jump_uniform: rng.gen(),
            jump_size: rng.sample(StandardNormal),
        }
    }
}

/// A fitted model: validated parameters with the fit's likelihood and
/// residual sequence, ready for diagnostic scoring.
#[derive(Debug, Clone)]
pub struct ModelFit<P> {
    /// Estimated, validated parameters.
    pub params: P,
    /// Gaussian log-likelihood of the fit.
    pub log_likelihood: f64,
    /// Fit residuals, in observation order.
    pub residuals: Vec<f64>,
}

/// Parameters of one model of the family, tagged by model.
///
/// The serialised form is adjacently tagged so the model name travels next
/// to its parameter payload; `vasicek` and `merton` are accepted as
/// deserialisation aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", content = "parameters", rename_all = "snake_case")]
pub enum ModelParams {
    /// Geometric Brownian motion.
    Gbm(GbmParams),
    /// Ornstein-Uhlenbeck (Vasicek).
    #[serde(alias = "vasicek")]
    OrnsteinUhlenbeck(OuParams),
    /// Heston stochastic volatility.
    Heston(HestonParams),
    /// Merton jump-diffusion.
    #[serde(alias = "merton")]
    MertonJump(MertonParams),
}

impl ModelParams {
    /// The discriminant of the wrapped parameters.
    pub const fn model_type(&self) -> ModelType {
        match self {
            ModelParams::Gbm(_) => ModelType::Gbm,
            ModelParams::OrnsteinUhlenbeck(_) => ModelType::OrnsteinUhlenbeck,
            ModelParams::Heston(_) => ModelType::Heston,
            ModelParams::MertonJump(_) => ModelType::MertonJump,
        }
    }

    /// Number of free parameters, matching [`Self::named_values`].
    pub const fn parameter_count(&self) -> usize {
        self.model_type().parameter_count()
    }

    /// Re-runs the wrapped parameter validation.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ModelParams::Gbm(p) => p.validate(),
            ModelParams::OrnsteinUhlenbeck(p) => p.validate(),
            ModelParams::Heston(p) => p.validate(),
            ModelParams::MertonJump(p) => p.validate(),
        }
    }

    /// Parameter names and values in schema order, for interval reporting.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        match self {
            ModelParams::Gbm(p) => vec![("mu", p.mu), ("sigma", p.sigma)],
            ModelParams::OrnsteinUhlenbeck(p) => {
                vec![("theta", p.theta), ("mu", p.mu), ("sigma", p.sigma)]
            }
            ModelParams::Heston(p) => vec![
                ("mu", p.mu),
                ("kappa", p.kappa),
                ("theta", p.theta),
                ("xi", p.xi),
                ("rho", p.rho),
                ("v0", p.v0),
            ],
            ModelParams::MertonJump(p) => vec![
                ("mu", p.mu),
                ("sigma", p.sigma),
                ("lambda", p.lambda),
                ("mu_jump", p.mu_jump),
                ("sigma_jump", p.sigma_jump),
            ],
        }
    }

    /// The state a path starts from at the given initial level. Heston
    /// paths start at their estimated instantaneous variance `v0`.
    pub fn initial_state(&self, initial_value: f64) -> SdeState {
        match self {
            ModelParams::Heston(p) => SdeState::WithVariance {
                value: initial_value,
                variance: p.v0,
            },
            _ => SdeState::Single(initial_value),
        }
    }

    /// Advances the state by one step of length `dt` under the given shock.
    ///
    /// A Heston step presented with a bare [`SdeState::Single`] level is
    /// lifted to `v0`, the correct variance at the start of a path.
    #[inline]
    pub fn step(&self, state: SdeState, dt: f64, shock: &StepShock) -> SdeState {
        match self {
            ModelParams::Gbm(p) => {
                SdeState::Single(gbm::step(state.value(), dt, shock.diffusion, p))
            }
            ModelParams::OrnsteinUhlenbeck(p) => SdeState::Single(ornstein_uhlenbeck::step(
                state.value(),
                dt,
                shock.diffusion,
                p,
            )),
            ModelParams::Heston(p) => {
                let variance = match state {
                    SdeState::WithVariance { variance, .. } => variance,
                    SdeState::Single(_) => p.v0,
                };
                let (value, variance) = heston::step(
                    state.value(),
                    variance,
                    dt,
                    shock.diffusion,
                    shock.second_factor,
                    p,
                );
                SdeState::WithVariance { value, variance }
            }
            ModelParams::MertonJump(p) => SdeState::Single(merton::step(
                state.value(),
                dt,
                shock.diffusion,
                shock.jump_uniform,
                shock.jump_size,
                p,
            )),
        }
    }

    /// Generates one path of `n_steps` increments of length `dt`, drawing
    /// one [`StepShock`] per step from `rng`. The returned levels include
    /// the initial value, so the vector has `n_steps + 1` entries.
    ///
    /// Because every model consumes one full shock set per step, two
    /// differently parameterised paths driven from equally seeded
    /// generators see identical shock sequences.
    pub fn generate_path<R: Rng + ?Sized>(
        &self,
        initial_value: f64,
        n_steps: usize,
        dt: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        let mut path = Vec::with_capacity(n_steps + 1);
        let mut state = self.initial_state(initial_value);
        path.push(state.value());
        for _ in 0..n_steps {
            let shock = StepShock::draw(rng);
            state = self.step(state, dt, &shock);
            path.push(state.value());
        }
        path
    }
}
