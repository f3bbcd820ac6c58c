//! # event_core: Numeric Foundation for the Event Probability Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! event_core is the bottom layer of the 4-layer architecture, providing:
//! - Historical series container with validated construction (`types::series`)
//! - Sampling-frequency / annualisation mapping (`types::frequency`)
//! - Structured error types for input data (`types::error`)
//! - Standard normal CDF/PDF and inverse CDF (`math::normal`)
//! - Moment and autocorrelation statistics (`math::stats`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other event_* crates, with minimal external
//! dependencies:
//! - chrono: date-stamped series construction
//! - thiserror: structured error types
//! - serde: serialisation of the small value types that cross the API boundary
//!
//! ## Usage Examples
//!
//! ```rust
//! use event_core::math::normal::norm_cdf;
//! use event_core::types::{SamplingFrequency, TimeSeries};
//!
//! let series = TimeSeries::from_values(vec![100.0, 101.5, 99.8, 102.3]).unwrap();
//! assert_eq!(series.len(), 4);
//!
//! // Daily observations annualise with dt = 1/252
//! assert!((SamplingFrequency::Daily.dt() - 1.0 / 252.0).abs() < 1e-15);
//!
//! let cdf = norm_cdf(0.0);
//! assert!((cdf - 0.5).abs() < 1e-7);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
