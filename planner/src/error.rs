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

//! Planner error taxonomy

use crate::condition::Operator;
use crate::value::ValueKind;
use thiserror::Error;

/// Faults raised while building or running a plan.
///
/// An unreachable goal is not a fault: the solver reports it as a
/// [`Plan`](crate::Plan) with `success == false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A state index was read but never set.
    #[error("State index not found: {0}")]
    NotFound(String),

    /// A condition or diff expected a different value kind at this index.
    #[error("Type mismatch at state index '{index}': expected {expected}, found {found}")]
    TypeMismatch {
        index: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The operator cannot be applied to values of this kind.
    #[error("Operator '{operator}' is not supported for {kind} values")]
    UnsupportedOperator { operator: Operator, kind: ValueKind },

    /// Dequeue was called on an empty priority queue.
    #[error("The priority queue is empty")]
    QueueEmpty,

    /// An action with the same name is already in the pool.
    #[error("Action already registered: {0}")]
    DuplicateAction(String),

    /// Two diffs of the same action target one state index.
    #[error("Action '{action}' has more than one diff targeting state index '{index}'")]
    ConflictingDiffs { action: String, index: String },

    /// Action cost is negative, NaN or infinite.
    #[error("Action '{action}' has an invalid cost: {cost}")]
    InvalidCost { action: String, cost: f64 },

    /// A diff could never change the state it targets.
    #[error("Invalid diff on state index '{index}': {reason}")]
    InvalidDiff { index: String, reason: String },

    /// The caller cancelled the search.
    #[error("Planning was cancelled")]
    Cancelled,

    /// Solver configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for planner operations.
pub type PlanResult<T> = Result<T, PlanError>;
