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

use crate::action::Action;
use std::sync::Arc;

/// Cost reported by a plan that did not reach the goal.
pub const FAILURE_COST: f64 = -1.0;

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the open set and expanded
    pub expanded: usize,
    /// Child states produced by simulating actions
    pub generated: usize,
    /// Nodes or children dropped because their state was already closed
    pub skipped_closed: usize,
}

/// Result of a solve
///
/// A failed plan (`success == false`) has no actions and costs
/// [`FAILURE_COST`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Actions in execution order
    pub actions: Vec<Arc<Action>>,
    /// Sum of the action costs
    pub cost: f64,
    pub success: bool,
    pub stats: SearchStats,
}

impl Plan {
    pub(crate) fn found(actions: Vec<Arc<Action>>, cost: f64, stats: SearchStats) -> Self {
        Self {
            actions,
            cost,
            success: true,
            stats,
        }
    }

    pub(crate) fn not_found(stats: SearchStats) -> Self {
        Self {
            actions: Vec::new(),
            cost: FAILURE_COST,
            success: false,
            stats,
        }
    }

    /// Number of actions in the plan
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }
}
