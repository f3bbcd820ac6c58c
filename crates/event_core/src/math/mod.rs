//! Numeric building blocks shared by the estimation and simulation layers.
//!
//! This module provides:
//! - `normal`: standard normal PDF, CDF, and inverse CDF
//! - `stats`: moment and autocorrelation statistics over slices
//!
//! # Re-exports
//!
//! - [`norm_cdf`], [`norm_pdf`], [`norm_inv_cdf`] from `normal`

pub mod normal;
pub mod stats;

// Re-export commonly used functions at module level
pub use normal::{norm_cdf, norm_inv_cdf, norm_pdf};
