//! Parameter estimation: fitting, inference, and diagnostics.
//!
//! The entry point is [`estimate`] / [`estimate_with_frequency`], which
//! dispatch a [`TimeSeries`](event_core::types::TimeSeries) to the model's
//! closed-form estimator and assemble the full [`ParameterEstimate`] report.
//!
//! # Re-exports
//!
//! - [`estimate`], [`estimate_with_frequency`] from `estimator`
//! - [`ParameterEstimate`], [`ParameterInterval`] from `result`
//! - [`EstimationDiagnostics`] from `diagnostics`
//! - [`InferenceMethod`] from `inference`

pub mod diagnostics;
pub mod estimator;
pub mod inference;
pub mod result;

// Re-export commonly used types at module level
pub use diagnostics::EstimationDiagnostics;
pub use estimator::{estimate, estimate_with_frequency};
pub use inference::InferenceMethod;
pub use result::{ParameterEstimate, ParameterInterval};
