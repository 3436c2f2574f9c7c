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

//! GOAP actions: a precondition, a set of state diffs and a cost

use crate::condition::Condition;
use crate::diff::StateDiff;
use crate::error::{PlanError, PlanResult};
use crate::state::State;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Action cost type
pub type ActionCost = f64;

/// Cost of an action built without an explicit cost.
pub const DEFAULT_COST: ActionCost = 1.0;

/// GOAP Action definition
///
/// Immutable once built. Construction rejects negative or non-finite costs,
/// invalid diffs, and two diffs touching the same state index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ActionDefinition")]
pub struct Action {
    name: String,
    precondition: Condition,
    diffs: Vec<StateDiff>,
    cost: ActionCost,
}

impl Action {
    /// Create a validated action
    pub fn new(
        name: impl Into<String>,
        precondition: Condition,
        diffs: Vec<StateDiff>,
        cost: ActionCost,
    ) -> PlanResult<Self> {
        let name = name.into();

        if !cost.is_finite() || cost < 0.0 {
            return Err(PlanError::InvalidCost { action: name, cost });
        }

        let mut touched = HashSet::new();
        for diff in &diffs {
            diff.validate()?;
            if !touched.insert(diff.index()) {
                return Err(PlanError::ConflictingDiffs {
                    action: name,
                    index: diff.index().to_string(),
                });
            }
        }

        Ok(Self {
            name,
            precondition,
            diffs,
            cost,
        })
    }

    /// Start building an action with no precondition, no diffs and
    /// [`DEFAULT_COST`].
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            name: name.into(),
            precondition: Condition::Always,
            diffs: Vec::new(),
            cost: DEFAULT_COST,
        }
    }

    /// Unique name within a solver's action pool
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn precondition(&self) -> &Condition {
        &self.precondition
    }

    /// Diffs in application order
    pub fn diffs(&self) -> &[StateDiff] {
        &self.diffs
    }

    pub fn cost(&self) -> ActionCost {
        self.cost
    }

    /// Check if the precondition holds in `state`
    pub fn is_available(&self, state: &State) -> PlanResult<bool> {
        self.precondition.is_satisfied(state)
    }

    /// Apply every diff to a copy of `state` and return the copy.
    pub fn simulate(&self, state: &State) -> PlanResult<State> {
        let mut next = state.clone();
        self.simulate_in_place(&mut next)?;
        Ok(next)
    }

    /// Apply every diff directly to a caller-owned `state`.
    ///
    /// On error the state may hold the effects of the diffs applied so far.
    pub fn simulate_in_place(&self, state: &mut State) -> PlanResult<()> {
        for diff in &self.diffs {
            diff.apply(state)?;
        }
        Ok(())
    }
}

/// Builder for [`Action`]
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    name: String,
    precondition: Condition,
    diffs: Vec<StateDiff>,
    cost: ActionCost,
}

impl ActionBuilder {
    /// Set the precondition
    pub fn with_precondition(mut self, precondition: Condition) -> Self {
        self.precondition = precondition;
        self
    }

    /// Add a diff
    pub fn with_diff(mut self, diff: StateDiff) -> Self {
        self.diffs.push(diff);
        self
    }

    /// Set the cost
    pub fn with_cost(mut self, cost: ActionCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn build(self) -> PlanResult<Action> {
        Action::new(self.name, self.precondition, self.diffs, self.cost)
    }
}

/// Unvalidated wire shape of an [`Action`]
#[derive(Deserialize)]
struct ActionDefinition {
    name: String,
    #[serde(default)]
    precondition: Condition,
    #[serde(default)]
    diffs: Vec<StateDiff>,
    #[serde(default = "default_cost")]
    cost: ActionCost,
}

fn default_cost() -> ActionCost {
    DEFAULT_COST
}

impl TryFrom<ActionDefinition> for Action {
    type Error = PlanError;

    fn try_from(definition: ActionDefinition) -> Result<Self, Self::Error> {
        Action::new(
            definition.name,
            definition.precondition,
            definition.diffs,
            definition.cost,
        )
    }
}
