//! Event definitions and their evaluation against simulated outcomes.
//!
//! An event is a predicate over the simulated variables at the horizon:
//! either a single threshold breach (`cpi_inflation > 0.08`) or a compound
//! of such conditions joined by one logical operator. Definitions arrive as
//! dashboard JSON; before a run they are compiled to an index-resolved form
//! so the per-scenario check does no string lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

use event_models::EventVariable;

use crate::error::SimulationError;

/// Comparison applied between a simulated value and a threshold.
///
/// Serialises as the operator symbol the dashboard grammar uses, e.g.
/// `">="`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Strictly greater than.
    #[serde(rename = ">")]
    Gt,
    /// Strictly less than.
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
    /// Exact equality. Brittle on doubles; in practice only hit when a
    /// path is pinned to a constant. Kept because the grammar includes it.
    #[serde(rename = "==")]
    Eq,
}

impl ComparisonOp {
    /// Applies the comparison. Any comparison against NaN is false, so a
    /// non-finite threshold yields an event that never fires rather than a
    /// panic.
    #[inline]
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            ComparisonOp::Gt => lhs > rhs,
            ComparisonOp::Lt => lhs < rhs,
            ComparisonOp::Ge => lhs >= rhs,
            ComparisonOp::Le => lhs <= rhs,
            ComparisonOp::Eq => lhs == rhs,
        }
    }

    /// The operator symbol, as serialised.
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Le => "<=",
            ComparisonOp::Eq => "==",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connective joining the conditions of a compound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    /// Every condition must hold.
    And,
    /// At least one condition must hold.
    Or,
}

/// One `variable <op> threshold` condition inside a compound event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCondition {
    /// Name of the variable the condition reads.
    pub variable: String,
    /// Comparison operator.
    pub operator: ComparisonOp,
    /// Threshold the simulated value is compared against.
    pub threshold: f64,
}

impl ThresholdCondition {
    /// Creates a condition.
    pub fn new(variable: impl Into<String>, operator: ComparisonOp, threshold: f64) -> Self {
        Self {
            variable: variable.into(),
            operator,
            threshold,
        }
    }
}

/// A predicate over simulated variables, evaluated at the horizon.
///
/// The serialised form is internally tagged:
///
/// ```json
/// {
///   "type": "compound",
///   "operator": "and",
///   "conditions": [
///     { "variable": "cpi_inflation", "operator": ">", "threshold": 0.08 },
///     { "variable": "gdp_growth", "operator": "<", "threshold": 0.0 }
///   ],
///   "horizon_months": 12
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventDefinition {
    /// A single variable crossing a threshold.
    ThresholdBreach {
        /// Name of the variable the condition reads.
        variable: String,
        /// Comparison operator.
        operator: ComparisonOp,
        /// Threshold the simulated value is compared against.
        threshold: f64,
        /// Months ahead at which the condition is checked.
        horizon_months: u32,
    },
    /// Several conditions joined by one logical operator. Nesting is flat:
    /// a compound holds conditions, not other compounds.
    Compound {
        /// Connective applied across `conditions`.
        operator: LogicalOp,
        /// The conditions; must be non-empty.
        conditions: Vec<ThresholdCondition>,
        /// Months ahead at which the conditions are checked.
        horizon_months: u32,
    },
}

impl EventDefinition {
    /// The horizon this event is evaluated at, in months.
    pub fn horizon_months(&self) -> u32 {
        match self {
            EventDefinition::ThresholdBreach { horizon_months, .. }
            | EventDefinition::Compound { horizon_months, .. } => *horizon_months,
        }
    }

    /// Distinct variable names this event reads, in first-use order.
    ///
    /// The order is load-bearing: it fixes which copula margin drives which
    /// variable, so a seeded run is reproducible from the definition alone.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (name, _, _) in self.condition_tuples() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Checks the event is well-formed against the supplied variables:
    /// non-empty, and every referenced name resolves.
    ///
    /// # Errors
    ///
    /// [`SimulationError::EmptyCompound`] for a compound with no conditions,
    /// [`SimulationError::InvalidEventReference`] for an unknown name.
    pub fn validate(&self, variables: &[EventVariable]) -> Result<(), SimulationError> {
        CompiledEvent::compile(self, variables).map(|_| ())
    }

    /// All conditions as `(variable, operator, threshold)` tuples, in
    /// definition order.
    fn condition_tuples(&self) -> Vec<(&str, ComparisonOp, f64)> {
        match self {
            EventDefinition::ThresholdBreach {
                variable,
                operator,
                threshold,
                ..
            } => vec![(variable.as_str(), *operator, *threshold)],
            EventDefinition::Compound { conditions, .. } => conditions
                .iter()
                .map(|c| (c.variable.as_str(), c.operator, c.threshold))
                .collect(),
        }
    }

    /// The connective for evaluation; a single breach behaves as a one-
    /// condition conjunction.
    fn logical_operator(&self) -> LogicalOp {
        match self {
            EventDefinition::ThresholdBreach { .. } => LogicalOp::And,
            EventDefinition::Compound { operator, .. } => *operator,
        }
    }
}

/// One condition with its variable resolved to a slot in the simulated
/// vector.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CompiledCondition {
    variable: usize,
    operator: ComparisonOp,
    threshold: f64,
}

impl CompiledCondition {
    #[inline]
    fn holds(&self, finals: &[f64]) -> bool {
        self.operator.apply(finals[self.variable], self.threshold)
    }
}

/// An [`EventDefinition`] with every variable reference resolved to an
/// index, ready for the per-scenario check.
#[derive(Clone, Debug)]
pub(crate) struct CompiledEvent {
    operator: LogicalOp,
    conditions: Vec<CompiledCondition>,
}

impl CompiledEvent {
    /// Validates `event` against `variables` and resolves each condition to
    /// a slot in the referenced-variable list, which is returned alongside
    /// in first-use order.
    pub(crate) fn compile<'v>(
        event: &EventDefinition,
        variables: &'v [EventVariable],
    ) -> Result<(Self, Vec<&'v EventVariable>), SimulationError> {
        let tuples = event.condition_tuples();
        if tuples.is_empty() {
            return Err(SimulationError::EmptyCompound);
        }

        let mut referenced: Vec<&'v EventVariable> = Vec::new();
        let mut conditions = Vec::with_capacity(tuples.len());
        for (name, operator, threshold) in tuples {
            let slot = match referenced.iter().position(|v| v.name == name) {
                Some(slot) => slot,
                None => {
                    let variable = variables.iter().find(|v| v.name == name).ok_or_else(|| {
                        SimulationError::InvalidEventReference {
                            variable: name.to_string(),
                        }
                    })?;
                    referenced.push(variable);
                    referenced.len() - 1
                }
            };
            conditions.push(CompiledCondition {
                variable: slot,
                operator,
                threshold,
            });
        }

        Ok((
            Self {
                operator: event.logical_operator(),
                conditions,
            },
            referenced,
        ))
    }

    /// Evaluates the event against the horizon values of the referenced
    /// variables, indexed in compile order.
    #[inline]
    pub(crate) fn evaluate(&self, finals: &[f64]) -> bool {
        match self.operator {
            LogicalOp::And => self.conditions.iter().all(|c| c.holds(finals)),
            LogicalOp::Or => self.conditions.iter().any(|c| c.holds(finals)),
        }
    }

    /// The single-variable sub-event: conditions on `variable` only, joined
    /// by the same operator and reindexed to slot 0. The marginal
    /// re-simulation evaluates it against that variable's value alone.
    pub(crate) fn restricted_to(&self, variable: usize) -> CompiledEvent {
        CompiledEvent {
            operator: self.operator,
            conditions: self
                .conditions
                .iter()
                .filter(|c| c.variable == variable)
                .map(|c| CompiledCondition {
                    variable: 0,
                    ..*c
                })
                .collect(),
        }
    }

    /// The connective this event evaluates under.
    pub(crate) fn operator(&self) -> LogicalOp {
        self.operator
    }
}
