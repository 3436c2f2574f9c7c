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

//! A* planner over an action pool
//!
//! A [`Solver`] owns a pool of [`Action`]s and searches for the cheapest
//! sequence of them that takes a current [`State`] to one satisfying a goal
//! [`Condition`].
//!
//! The heuristic is the goal's [`Condition::estimate_cost`] under weights
//! derived from the pool: each index is weighted by the largest
//! `|cost / diff|` any action shows for it.
//!
//! The pool is an immutable snapshot shared with every running solve.
//! Mutating the solver copies the pool first when a solve still holds it,
//! so searches never observe pool changes.

mod outcome;
mod pool;
mod search;
mod weights;

pub use outcome::{FAILURE_COST, Plan, SearchStats};
pub use pool::ActionPool;
pub use search::{SolveOptions, SolverPhase};

use crate::action::Action;
use crate::condition::{Condition, CostWeights};
use crate::config::SolverConfig;
use crate::error::{PlanError, PlanResult};
use crate::state::State;
use metrics::{counter, histogram};
use search::Search;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct Solver {
    pool: Arc<ActionPool>,
    defaults: SolveOptions,
}

impl Solver {
    /// Empty solver with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty solver whose [`solve_default`](Self::solve_default) uses the
    /// limits from `config`
    pub fn with_config(config: &SolverConfig) -> Self {
        Self {
            pool: Arc::default(),
            defaults: SolveOptions::from(config),
        }
    }

    pub fn add_action(&mut self, action: Action) -> PlanResult<()> {
        debug!(action = action.name(), cost = action.cost(), "Adding action");
        Arc::make_mut(&mut self.pool).insert(action)
    }

    pub fn remove_action(&mut self, name: &str) -> Option<Arc<Action>> {
        if !self.pool.contains(name) {
            return None;
        }
        Arc::make_mut(&mut self.pool).remove(name)
    }

    /// Remove `name` and register `action` under its own name.
    pub fn replace_action(&mut self, name: &str, action: Action) -> Option<Arc<Action>> {
        debug!(replaced = name, action = action.name(), "Replacing action");
        Arc::make_mut(&mut self.pool).replace(name, action)
    }

    pub fn clear_action_pool(&mut self) {
        Arc::make_mut(&mut self.pool).clear();
    }

    pub fn action(&self, name: &str) -> Option<&Arc<Action>> {
        self.pool.get(name)
    }

    pub fn actions(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.pool.iter()
    }

    /// Current pool snapshot
    pub fn pool(&self) -> Arc<ActionPool> {
        Arc::clone(&self.pool)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Limits used by [`solve_default`](Self::solve_default)
    pub fn defaults(&self) -> &SolveOptions {
        &self.defaults
    }

    /// Heuristic weights the solver would use when starting from `current`
    pub fn weights(&self, current: &State) -> CostWeights {
        weights::derive_weights(&self.pool, current)
    }

    /// Cheapest plan of at most `max_depth` actions from `current` to `goal`.
    pub fn solve(&self, current: &State, goal: &Condition, max_depth: usize) -> PlanResult<Plan> {
        let options = SolveOptions {
            max_depth,
            ..self.defaults.clone()
        };
        self.solve_with(current, goal, &options)
    }

    /// [`solve`](Self::solve) with the configured limits
    pub fn solve_default(&self, current: &State, goal: &Condition) -> PlanResult<Plan> {
        self.solve_with(current, goal, &self.defaults)
    }

    #[instrument(level = "debug", skip(self, current, goal, options), fields(goal = %goal, max_depth = options.max_depth))]
    pub fn solve_with(
        &self,
        current: &State,
        goal: &Condition,
        options: &SolveOptions,
    ) -> PlanResult<Plan> {
        let start = std::time::Instant::now();
        let pool = Arc::clone(&self.pool);
        debug!(actions = pool.len(), state = %current, "Starting solve");

        let result = Search::new(&pool, goal, options).run(current);

        let duration = start.elapsed().as_secs_f64();
        histogram!("goap.solver.solve.duration").record(duration);
        match &result {
            Ok(plan) => {
                let outcome = if plan.success { "success" } else { "failure" };
                counter!("goap.solver.solves", "outcome" => outcome).increment(1);
                counter!("goap.solver.nodes.expanded").increment(plan.stats.expanded as u64);
                if plan.success {
                    histogram!("goap.solver.plan.length").record(plan.len() as f64);
                    debug!(
                        cost = plan.cost,
                        length = plan.len(),
                        expanded = plan.stats.expanded,
                        generated = plan.stats.generated,
                        "Plan found"
                    );
                    if options.log_plans {
                        debug!(plan = ?plan.names(), "Plan actions");
                    }
                } else {
                    debug!(
                        expanded = plan.stats.expanded,
                        generated = plan.stats.generated,
                        "No plan found"
                    );
                }
            }
            Err(PlanError::Cancelled) => {
                counter!("goap.solver.solves", "outcome" => "cancelled").increment(1);
            }
            Err(e) => {
                counter!("goap.solver.solves", "outcome" => "error").increment(1);
                debug!(error = %e, "Solve aborted");
            }
        }

        result
    }
}
