//! # event_copula (L3: Dependence Structure)
//!
//! Copula families coupling the per-step shocks of simulated variables, so
//! joint scenarios carry realistic co-movement instead of independent noise.
//!
//! This crate provides:
//! - A validated [`correlation::CorrelationMatrix`] with Cholesky
//!   factorisation
//! - The [`config::CopulaConfig`] family union (Gaussian, Student-t,
//!   Clayton, Gumbel) with serialisable parameters
//! - Build-once [`sampler::CopulaSampler`]s emitting coupled uniform
//!   vectors without per-draw allocation
//! - Tail-dependence coefficients derived analytically from the family
//!   parameters ([`tail`])
//!
//! ## Design Principles
//!
//! - **Validate at build, not at draw**: parameter checks and matrix
//!   factorisation happen once in [`sampler::CopulaSampler::new`]; the
//!   sampling path is branch-light and allocation-free
//! - **Open-interval uniforms**: every emitted value is clamped away from 0
//!   and 1 so inverse-CDF consumers stay finite
//! - **Derived, not stored**: tail-dependence coefficients are computed
//!   from θ and ν on demand and can never drift out of sync with the
//!   parameters

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod correlation;
pub mod error;
pub mod sampler;
pub mod tail;

pub use config::{CopulaConfig, CopulaFamily};
pub use correlation::CorrelationMatrix;
pub use error::CopulaError;
pub use sampler::CopulaSampler;
pub use tail::TailDependence;
