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

//! A* over simulated world states

use super::outcome::{Plan, SearchStats};
use super::pool::ActionPool;
use super::weights::derive_weights;
use crate::action::Action;
use crate::condition::{Condition, CostWeights};
use crate::config::SolverConfig;
use crate::error::{PlanError, PlanResult};
use crate::queue::PriorityQueue;
use crate::state::State;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Per-call search limits
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Plans never contain more actions than this
    pub max_depth: usize,
    /// Stop with a failed plan after this many expansions
    pub max_expansions: Option<usize>,
    /// Checked once per dequeue; firing it aborts the solve
    pub cancellation: Option<CancellationToken>,
    /// Log the action sequence of successful plans
    pub log_plans: bool,
}

impl SolveOptions {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_expansions: None,
            cancellation: None,
            log_plans: false,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn with_log_plans(mut self, log_plans: bool) -> Self {
        self.log_plans = log_plans;
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self::from(&SolverConfig::default())
    }
}

impl From<&SolverConfig> for SolveOptions {
    fn from(config: &SolverConfig) -> Self {
        Self {
            max_depth: config.max_depth.depth(),
            max_expansions: config.max_expansions,
            cancellation: None,
            log_plans: config.log_plans,
        }
    }
}

/// Where a solve currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPhase {
    Idle,
    Weighing,
    Searching,
    Succeeded,
    Failed,
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverPhase::Idle => "idle",
            SolverPhase::Weighing => "weighing",
            SolverPhase::Searching => "searching",
            SolverPhase::Succeeded => "succeeded",
            SolverPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A node in the search tree. The state is taken out when the node is
/// dequeued; parents are only needed for their action and link.
#[derive(Debug)]
struct PlanNode {
    state: Option<State>,
    action: Option<Arc<Action>>,
    parent: Option<usize>,
    cost: f64,
    depth: usize,
}

/// Open set entry: lowest total first, then oldest first.
#[derive(Debug)]
struct Frontier {
    total: f64,
    sequence: u64,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total
            .total_cmp(&other.total)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// One A* run over a fixed pool snapshot
pub(crate) struct Search<'a> {
    pool: &'a ActionPool,
    goal: &'a Condition,
    options: &'a SolveOptions,
    weights: CostWeights,
    nodes: Vec<PlanNode>,
    open: PriorityQueue<Frontier>,
    /// Closed states and the shallowest depth each was closed at
    closed: HashMap<State, usize>,
    stats: SearchStats,
    sequence: u64,
    phase: SolverPhase,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        pool: &'a ActionPool,
        goal: &'a Condition,
        options: &'a SolveOptions,
    ) -> Self {
        Self {
            pool,
            goal,
            options,
            weights: CostWeights::new(),
            nodes: Vec::new(),
            open: PriorityQueue::new(),
            closed: HashMap::new(),
            stats: SearchStats::default(),
            sequence: 0,
            phase: SolverPhase::Idle,
        }
    }

    #[cfg(test)]
    fn phase(&self) -> SolverPhase {
        self.phase
    }

    #[cfg(test)]
    fn weights(&self) -> &CostWeights {
        &self.weights
    }

    fn transition(&mut self, next: SolverPhase) {
        trace!(from = %self.phase, to = %next, "Solver phase change");
        self.phase = next;
    }

    /// Run to completion. Search faults abort the run; an exhausted open set
    /// or expansion budget yields a failed plan.
    pub(crate) fn run(&mut self, current: &State) -> PlanResult<Plan> {
        self.transition(SolverPhase::Weighing);
        self.weights = derive_weights(self.pool, current);
        debug!(weighted = self.weights.len(), "Derived cost weights");

        self.transition(SolverPhase::Searching);
        let heuristic = self.goal.estimate_cost(current, &self.weights)?;
        self.push(current.clone(), None, None, 0.0, 0, heuristic);

        let result = self.drain();
        let next = match &result {
            Ok(plan) if plan.success => SolverPhase::Succeeded,
            _ => SolverPhase::Failed,
        };
        self.transition(next);
        result
    }

    fn drain(&mut self) -> PlanResult<Plan> {
        while !self.open.is_empty() {
            if self.options.is_cancelled() {
                debug!(expanded = self.stats.expanded, "Solve cancelled");
                return Err(PlanError::Cancelled);
            }

            let entry = self.open.dequeue()?;
            let Some(state) = self.nodes[entry.node].state.take() else {
                continue;
            };
            let depth = self.nodes[entry.node].depth;

            if self.is_closed(&state, depth) {
                self.stats.skipped_closed += 1;
                continue;
            }

            if self.goal.is_satisfied(&state)? {
                return Ok(self.reconstruct(entry.node));
            }

            if let Some(limit) = self.options.max_expansions {
                if self.stats.expanded >= limit {
                    warn!(
                        limit,
                        open = self.open.len(),
                        "Expansion budget exhausted before reaching goal"
                    );
                    return Ok(Plan::not_found(self.stats));
                }
            }

            self.stats.expanded += 1;
            self.closed.insert(state.clone(), depth);
            if depth < self.options.max_depth {
                self.expand(entry.node, &state)?;
            }
        }

        Ok(Plan::not_found(self.stats))
    }

    fn expand(&mut self, node: usize, state: &State) -> PlanResult<()> {
        let pool = self.pool;
        let goal = self.goal;
        let parent_cost = self.nodes[node].cost;
        let depth = self.nodes[node].depth + 1;

        for action in pool.iter() {
            if !action.is_available(state)? {
                continue;
            }

            let child = action.simulate(state)?;
            self.stats.generated += 1;
            if self.is_closed(&child, depth) {
                self.stats.skipped_closed += 1;
                continue;
            }

            let cost = parent_cost + action.cost();
            let heuristic = goal.estimate_cost(&child, &self.weights)?;
            trace!(
                action = action.name(),
                depth,
                cost,
                heuristic,
                "Generated child"
            );
            self.push(child, Some(Arc::clone(action)), Some(node), cost, depth, heuristic);
        }

        Ok(())
    }

    /// A state is settled once closed at this depth or shallower; reaching
    /// it again with fewer actions spent can still lead somewhere new.
    fn is_closed(&self, state: &State, depth: usize) -> bool {
        self.closed
            .get(state)
            .is_some_and(|&closed_at| closed_at <= depth)
    }

    fn push(
        &mut self,
        state: State,
        action: Option<Arc<Action>>,
        parent: Option<usize>,
        cost: f64,
        depth: usize,
        heuristic: f64,
    ) {
        let node = self.nodes.len();
        self.nodes.push(PlanNode {
            state: Some(state),
            action,
            parent,
            cost,
            depth,
        });
        self.open.enqueue(Frontier {
            total: cost + heuristic,
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
    }

    fn reconstruct(&self, goal_node: usize) -> Plan {
        let mut actions = Vec::with_capacity(self.nodes[goal_node].depth);
        let mut cursor = Some(goal_node);
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            if let Some(action) = &node.action {
                actions.push(Arc::clone(action));
            }
            cursor = node.parent;
        }
        actions.reverse();
        Plan::found(actions, self.nodes[goal_node].cost, self.stats)
    }
}
