//! Core data types for historical observations.
//!
//! This module provides:
//! - `series`: validated, immutable historical observation container
//! - `frequency`: sampling frequency with annualisation factors
//! - `error`: structured error types for input data validation
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level:
//! - [`TimeSeries`] from `series`
//! - [`SamplingFrequency`] from `frequency`
//! - [`DataError`] from `error`

pub mod error;
pub mod frequency;
pub mod series;

// Re-export commonly used types at module level
pub use error::DataError;
pub use frequency::SamplingFrequency;
pub use series::TimeSeries;
