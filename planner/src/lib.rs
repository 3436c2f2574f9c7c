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

//! Goal-Oriented Action Planning
//!
//! This crate plans over a typed world state:
//! - [`State`]: named [`Value`]s (booleans, integers, floats, symbols)
//! - [`Condition`]: boolean trees of comparisons, with a cost estimate
//! - [`Action`]: a precondition, a set of [`StateDiff`]s and a cost
//! - [`Solver`]: depth-bounded A* from a current state to a goal
//!
//! ```
//! use goap_planner::{Action, Condition, Solver, State, StateDiff};
//!
//! let mut solver = Solver::new();
//! solver
//!     .add_action(
//!         Action::builder("chop wood")
//!             .with_precondition(Condition::eq("has_axe", true))
//!             .with_diff(StateDiff::add("wood", 1))
//!             .with_cost(2.0)
//!             .build()?,
//!     )?;
//! solver.add_action(
//!     Action::builder("buy axe")
//!         .with_diff(StateDiff::set("has_axe", true))
//!         .with_cost(5.0)
//!         .build()?,
//! )?;
//!
//! let current = State::new().with("has_axe", false).with("wood", 0);
//! let plan = solver.solve(&current, &Condition::ge("wood", 2), 5)?;
//! assert!(plan.success);
//! assert_eq!(plan.names(), ["buy axe", "chop wood", "chop wood"]);
//! assert_eq!(plan.cost, 9.0);
//! # Ok::<(), goap_planner::PlanError>(())
//! ```

pub mod action;
pub mod condition;
pub mod config;
pub mod diff;
pub mod error;
pub mod queue;
pub mod solver;
pub mod state;
pub mod value;

pub use action::{Action, ActionBuilder, ActionCost};
pub use condition::{Condition, CostWeights, Operator};
pub use config::{MaxDepth, SolverConfig};
pub use diff::StateDiff;
pub use error::{PlanError, PlanResult};
pub use queue::PriorityQueue;
pub use solver::{ActionPool, FAILURE_COST, Plan, SearchStats, SolveOptions, Solver, SolverPhase};
pub use state::State;
pub use value::{EPSILON, Value, ValueKind};
