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

//! Integration tests for solver configuration, pool snapshots and limits

use goap_planner::{
    Action, Condition, PlanError, SolveOptions, Solver, SolverConfig, State, StateDiff,
};
use std::sync::Once;
use tokio_util::sync::CancellationToken;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn counter_solver() -> Solver {
    let mut solver = Solver::new();
    solver
        .add_action(
            Action::builder("+1 int")
                .with_diff(StateDiff::add("int", 1))
                .build()
                .unwrap(),
        )
        .unwrap();
    solver
}

#[test]
fn test_plans_respect_depth_bound() {
    init_tracing();
    let solver = counter_solver();
    let current = State::new().with("int", 0);

    for depth in 0..6 {
        let plan = solver.solve(&current, &Condition::ge("int", 4), depth).unwrap();
        assert!(plan.len() <= depth);
        assert_eq!(plan.success, depth >= 4, "depth {}", depth);
    }
}

#[test]
fn test_in_flight_snapshot_ignores_pool_changes() {
    init_tracing();
    let mut solver = counter_solver();
    let snapshot = solver.clone();

    solver.clear_action_pool();
    solver
        .add_action(
            Action::builder("+2 int")
                .with_diff(StateDiff::add("int", 2))
                .build()
                .unwrap(),
        )
        .unwrap();

    let current = State::new().with("int", 0);
    let goal = Condition::ge("int", 4);
    let old = snapshot.solve(&current, &goal, 10).unwrap();
    let new = solver.solve(&current, &goal, 10).unwrap();

    assert_eq!(old.names(), ["+1 int"; 4]);
    assert_eq!(new.names(), ["+2 int"; 2]);
}

#[test]
fn test_concurrent_solves_share_one_solver() {
    init_tracing();
    let solver = counter_solver();
    let current = State::new().with("int", 0);

    let lengths: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|target| {
                let solver = &solver;
                let current = &current;
                scope.spawn(move || {
                    solver
                        .solve(current, &Condition::ge("int", target), 10)
                        .unwrap()
                        .len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(lengths, vec![1, 2, 3, 4]);
}

#[test]
fn test_cancelled_solve_returns_error() {
    init_tracing();
    let solver = counter_solver();
    let token = CancellationToken::new();
    let options = SolveOptions::new(10).with_cancellation(token.clone());

    let current = State::new().with("int", 0);
    let goal = Condition::ge("int", 3);
    assert!(solver.solve_with(&current, &goal, &options).unwrap().success);

    token.cancel();
    assert_eq!(
        solver.solve_with(&current, &goal, &options),
        Err(PlanError::Cancelled)
    );
}

#[test]
fn test_expansion_budget_yields_failed_plan() {
    init_tracing();
    let solver = counter_solver();
    let current = State::new().with("int", 0);
    let goal = Condition::ge("int", 8);

    let options = SolveOptions::new(20).with_max_expansions(3);
    let plan = solver.solve_with(&current, &goal, &options).unwrap();
    assert!(!plan.success);
    assert_eq!(plan.stats.expanded, 3);

    let options = SolveOptions::new(20).with_max_expansions(8);
    let plan = solver.solve_with(&current, &goal, &options).unwrap();
    assert!(plan.success);
    assert_eq!(plan.len(), 8);
}

#[test]
fn test_solver_from_config_file() {
    init_tracing();
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("solver.yaml");
    std::fs::write(&file_path, "max_depth: \"3\"\nmax_expansions: 100\nlog_plans: true\n")
        .unwrap();

    let config = SolverConfig::load(file_path.to_str().unwrap()).unwrap();
    let mut solver = Solver::with_config(&config);
    solver
        .add_action(
            Action::builder("+1 int")
                .with_diff(StateDiff::add("int", 1))
                .build()
                .unwrap(),
        )
        .unwrap();

    assert_eq!(solver.defaults().max_depth, 3);
    assert_eq!(solver.defaults().max_expansions, Some(100));

    let current = State::new().with("int", 0);
    assert!(solver.solve_default(&current, &Condition::ge("int", 3)).unwrap().success);
    assert!(!solver.solve_default(&current, &Condition::ge("int", 4)).unwrap().success);
}

#[test]
fn test_solve_with_deserialized_pool() {
    init_tracing();
    let actions: Vec<Action> = serde_json::from_str(
        r#"[
            {
                "name": "buy axe",
                "diffs": [{"set": {"index": "has_axe", "value": {"bool": true}}}],
                "cost": 5.0
            },
            {
                "name": "chop wood",
                "precondition": {"compare": {"index": "has_axe", "operator": "equal", "value": {"bool": true}}},
                "diffs": [{"add": {"index": "wood", "delta": {"int": 1}}}],
                "cost": 2.0
            }
        ]"#,
    )
    .unwrap();

    let mut solver = Solver::new();
    for action in actions {
        solver.add_action(action).unwrap();
    }

    let current = State::new().with("has_axe", false).with("wood", 0);
    let plan = solver.solve(&current, &Condition::ge("wood", 2), 5).unwrap();
    assert_eq!(plan.names(), ["buy axe", "chop wood", "chop wood"]);
    assert_eq!(plan.cost, 9.0);

    let state: State = serde_json::from_str(r#"{"has_axe": {"bool": false}, "wood": {"int": 0}}"#)
        .unwrap();
    assert_eq!(state, current);
}

#[test]
fn test_plan_actions_replay_to_goal() {
    init_tracing();
    let mut solver = counter_solver();
    solver
        .add_action(
            Action::builder("double up")
                .with_precondition(Condition::ge("int", 1))
                .with_diff(StateDiff::add("bonus", 2.5))
                .with_cost(2.0)
                .build()
                .unwrap(),
        )
        .unwrap();

    let current = State::new().with("int", 0).with("bonus", 0.0);
    let goal = Condition::and([Condition::ge("int", 2), Condition::gt("bonus", 4.0)]);
    let plan = solver.solve(&current, &goal, 6).unwrap();
    assert!(plan.success);

    let mut state = current.clone();
    let mut cost = 0.0;
    for action in &plan.actions {
        assert!(action.is_available(&state).unwrap());
        action.simulate_in_place(&mut state).unwrap();
        cost += action.cost();
    }
    assert!(goal.is_satisfied(&state).unwrap());
    assert_eq!(cost, plan.cost);
    assert_eq!(plan.cost, 6.0);
}

#[test]
fn test_float_routes_below_the_tolerance_stay_distinct() {
    init_tracing();
    let mut solver = Solver::new();
    for step in [0.1, 0.4, 0.7] {
        solver
            .add_action(
                Action::builder(format!("+{} x", step))
                    .with_diff(StateDiff::add("x", step))
                    .with_cost(step)
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }

    // 0.1 + 0.7 lands just below 0.8 and must not hide 0.4 + 0.4.
    let current = State::new().with("x", 0.0);
    let goal = Condition::and([Condition::ge("x", 0.8), Condition::le("x", 0.8)]);
    for depth in 2..=4 {
        let plan = solver.solve(&current, &goal, depth).unwrap();
        assert!(plan.success, "depth {}", depth);
        assert_eq!(plan.names(), ["+0.4 x", "+0.4 x"]);
        assert!((plan.cost - 0.8).abs() < 1e-9, "depth {}: {}", depth, plan.cost);
    }
}

#[test]
fn test_large_float_progress_is_not_merged() {
    init_tracing();
    let mut solver = Solver::new();
    solver
        .add_action(
            Action::builder("mint")
                .with_diff(StateDiff::add("gold", 1e15))
                .build()
                .unwrap(),
        )
        .unwrap();

    let current = State::new().with("gold", 1e15);
    let plan = solver.solve(&current, &Condition::ge("gold", 2e15), 3).unwrap();
    assert!(plan.success);
    assert_eq!(plan.names(), ["mint"]);
    assert_eq!(plan.stats.skipped_closed, 0);

    let plan = solver.solve(&current, &Condition::ge("gold", 5e15), 4).unwrap();
    assert_eq!(plan.len(), 4);
}
