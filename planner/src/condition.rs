//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Conditions over a world state
//!
//! A [`Condition`] answers two questions about a [`State`]: whether it holds
//! ([`Condition::is_satisfied`]) and how expensive it looks to make it hold
//! ([`Condition::estimate_cost`]). The estimate is exactly `0.0` when the
//! condition is satisfied and positive otherwise, and it never exceeds the
//! true remaining cost when the weights come from
//! [`Solver::weights`](crate::Solver::weights).

use crate::error::{PlanError, PlanResult};
use crate::state::State;
use crate::value::{EPSILON, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Weight used for a state index that has no entry in [`CostWeights`].
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Floor for an unsatisfied leaf estimate, reached only through a zero
/// weight or an underflowing product.
const MIN_ESTIMATE: f64 = f64::MIN_POSITIVE;

/// Fixed estimate for an unsatisfied [`Condition::Not`].
const NOT_COST: f64 = 1.0;

/// Comparison operator of a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl Operator {
    /// Whether this operator needs an ordering rather than equality.
    pub fn is_ordering(self) -> bool {
        !matches!(self, Operator::Equal | Operator::NotEqual)
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::Greater => ordering == Ordering::Greater,
            Operator::GreaterOrEqual => ordering != Ordering::Less,
            Operator::Less => ordering == Ordering::Less,
            Operator::LessOrEqual => ordering != Ordering::Greater,
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Greater => write!(f, ">"),
            Operator::GreaterOrEqual => write!(f, ">="),
            Operator::Less => write!(f, "<"),
            Operator::LessOrEqual => write!(f, "<="),
            Operator::Equal => write!(f, "=="),
            Operator::NotEqual => write!(f, "!="),
        }
    }
}

/// Per-index scaling applied to distances when estimating cost
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostWeights {
    weights: HashMap<String, f64>,
}

impl CostWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `index`, or [`DEFAULT_WEIGHT`] when none is known.
    pub fn get(&self, index: &str) -> f64 {
        self.weights.get(index).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Set the weight for `index`, replacing any previous one.
    pub fn set(&mut self, index: impl Into<String>, weight: f64) {
        self.weights.insert(index.into(), weight);
    }

    /// Raise the weight for `index` to `weight` if it is larger than the
    /// current entry (or there is none).
    pub fn raise(&mut self, index: &str, weight: f64) {
        match self.weights.get_mut(index) {
            Some(current) if *current >= weight => {}
            Some(current) => *current = weight,
            None => {
                self.weights.insert(index.to_string(), weight);
            }
        }
    }

    pub fn contains(&self, index: &str) -> bool {
        self.weights.contains_key(index)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Predicate tree over a [`State`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `state[index] <operator> value`
    Compare {
        index: String,
        operator: Operator,
        value: Value,
    },
    /// Every child holds.
    And(Vec<Condition>),
    /// At least one child holds.
    Or(Vec<Condition>),
    /// The child does not hold.
    Not(Box<Condition>),
    /// Always holds.
    #[default]
    Always,
}

impl Condition {
    pub fn compare(index: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Condition::Compare {
            index: index.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn gt(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::Greater, value)
    }

    pub fn ge(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::GreaterOrEqual, value)
    }

    pub fn lt(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::Less, value)
    }

    pub fn le(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::LessOrEqual, value)
    }

    pub fn eq(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::Equal, value)
    }

    pub fn ne(index: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(index, Operator::NotEqual, value)
    }

    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(children.into_iter().collect())
    }

    pub fn not(child: Condition) -> Self {
        Condition::Not(Box::new(child))
    }

    pub fn always() -> Self {
        Condition::Always
    }

    /// Check whether the condition holds in `state`.
    pub fn is_satisfied(&self, state: &State) -> PlanResult<bool> {
        match self {
            Condition::Compare {
                index,
                operator,
                value,
            } => compare(state, index, *operator, value),
            Condition::And(children) => {
                for child in children {
                    if !child.is_satisfied(state)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Or(children) => {
                for child in children {
                    if child.is_satisfied(state)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::Not(child) => Ok(!child.is_satisfied(state)?),
            Condition::Always => Ok(true),
        }
    }

    /// Estimate the cost of reaching a state where this condition holds.
    ///
    /// * leaf: `distance * weight`, `0.0` when satisfied and never `0.0`
    ///   otherwise, even under a zero weight
    /// * `And`: Euclidean norm of the child estimates
    /// * `Or`: cheapest child estimate (`f64::INFINITY` with no children)
    /// * `Not`: a fixed `1.0` when unsatisfied
    pub fn estimate_cost(&self, state: &State, weights: &CostWeights) -> PlanResult<f64> {
        match self {
            Condition::Compare {
                index,
                operator,
                value,
            } => {
                if compare(state, index, *operator, value)? {
                    return Ok(0.0);
                }
                // compare() already checked the kinds
                let stored = state.get(index)?;
                let distance = stored.distance(value).map_err(|e| e.at(index))?;
                let distance = if distance > 0.0 {
                    distance
                } else {
                    smallest_step(value.kind())
                };
                Ok((distance * weights.get(index)).max(MIN_ESTIMATE))
            }
            Condition::And(children) => {
                let mut norm = 0.0f64;
                for child in children {
                    norm = norm.hypot(child.estimate_cost(state, weights)?);
                }
                Ok(norm)
            }
            Condition::Or(children) => {
                let mut min = f64::INFINITY;
                for child in children {
                    let cost = child.estimate_cost(state, weights)?;
                    if cost < min {
                        min = cost;
                    }
                }
                Ok(min)
            }
            Condition::Not(child) => {
                if child.is_satisfied(state)? {
                    Ok(NOT_COST)
                } else {
                    Ok(0.0)
                }
            }
            Condition::Always => Ok(0.0),
        }
    }

    /// State indices read by this condition, in tree order.
    pub fn indices(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_indices(&mut out);
        out
    }

    fn collect_indices<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::Compare { index, .. } => out.push(index.as_str()),
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_indices(out);
                }
            }
            Condition::Not(child) => child.collect_indices(out),
            Condition::Always => {}
        }
    }
}

/// Evaluate a single leaf comparison.
fn compare(state: &State, index: &str, operator: Operator, expected: &Value) -> PlanResult<bool> {
    let stored = state.get(index)?;
    stored.ensure_same_kind(expected).map_err(|e| e.at(index))?;

    if !operator.is_ordering() {
        let equal = stored.approx_eq(expected).map_err(|e| e.at(index))?;
        return Ok(if operator == Operator::Equal { equal } else { !equal });
    }

    match stored.ordering(expected).map_err(|e| e.at(index))? {
        Some(ordering) => Ok(operator.accepts(ordering)),
        None => Err(PlanError::UnsupportedOperator {
            operator,
            kind: stored.kind(),
        }),
    }
}

/// Distance credited to an unsatisfied leaf whose values are already equal.
fn smallest_step(kind: ValueKind) -> f64 {
    match kind {
        ValueKind::Float => EPSILON,
        ValueKind::Bool | ValueKind::Int | ValueKind::Symbol => 1.0,
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare {
                index,
                operator,
                value,
            } => write!(f, "{} {} {}", index, operator, value),
            Condition::And(children) => write_joined(f, children, " && ", "true"),
            Condition::Or(children) => write_joined(f, children, " || ", "false"),
            Condition::Not(child) => write!(f, "!({})", child),
            Condition::Always => write!(f, "true"),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[Condition],
    separator: &str,
    empty: &str,
) -> fmt::Result {
    if children.is_empty() {
        return write!(f, "{}", empty);
    }
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}
