//! # event_engine (L4: Monte Carlo Orchestrator)
//!
//! The top layer of the event probability engine: given an event predicate,
//! calibrated variables, and a copula, estimate the probability that the
//! event holds at the horizon, with a confidence interval and a dependence
//! decomposition the dashboard can display.
//!
//! This crate provides:
//! - [`event::EventDefinition`]: threshold and compound predicates over
//!   simulated variables, JSON-shaped for the dashboard
//! - [`config::SimulationConfig`]: validated run configuration with builder
//! - [`simulation::MonteCarloEngine`]: the rayon-parallel scenario loop
//!   coupling variables through a [`event_copula::CopulaSampler`]
//! - [`result::EventProbabilityResult`]: probability, Wilson 90% interval,
//!   and per-variable dependence decomposition
//! - [`cancel::CancellationToken`] for cooperative early stopping and
//!   [`rng::ScenarioRng`] for deterministic per-scenario streams
//!
//! ## Design Principles
//!
//! - **Determinism first**: every scenario owns a stream derived from the
//!   master seed and its index, so a seeded run is bit-identical across
//!   thread counts and across the joint and marginal passes
//! - **Validate before simulating**: config, variable list, event
//!   references, and copula factorisation are all checked before the first
//!   scenario runs; a failed run never returns a partial result
//! - **Compile the predicate once**: event evaluation in the hot loop is
//!   index arithmetic, never string lookup

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod event;
pub mod result;
pub mod rng;
pub mod simulation;

pub use cancel::CancellationToken;
pub use config::{Discretization, SimulationConfig, SimulationConfigBuilder};
pub use error::{ConfigError, SimulationError};
pub use event::{ComparisonOp, EventDefinition, LogicalOp, ThresholdCondition};
pub use result::{
    wilson_interval, EventProbabilityResult, ProbabilityEstimate, RiskDecomposition,
};
pub use rng::ScenarioRng;
pub use simulation::MonteCarloEngine;
