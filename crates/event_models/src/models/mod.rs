//! The closed stochastic-model family.
//!
//! One module per model, each exposing a parameter struct with validation, a
//! pure `step` function driven by explicit shocks, and an `estimate` function
//! fitting the model to a prepared observation sequence. The
//! [`dynamics::ModelParams`] tagged union dispatches over the family without
//! trait objects.
//!
//! # Re-exports
//!
//! - [`ModelParams`], [`ModelType`], [`SdeState`], [`StepShock`], [`ModelFit`]
//!   from `dynamics`
//! - [`GbmParams`], [`OuParams`], [`HestonParams`], [`MertonParams`] from the
//!   model modules

pub mod dynamics;
pub mod gbm;
pub mod heston;
pub mod merton;
pub mod ornstein_uhlenbeck;

// Re-export commonly used types at module level
pub use dynamics::{ModelFit, ModelParams, ModelType, SdeState, StepShock};
pub use gbm::GbmParams;
pub use heston::HestonParams;
pub use merton::MertonParams;
pub use ornstein_uhlenbeck::OuParams;

/// Variance floor applied inside likelihood evaluation so a dispersion-free
/// series yields a large finite log-likelihood instead of an infinity.
pub(crate) const LIKELIHOOD_VARIANCE_FLOOR: f64 = 1e-12;
