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

//! Performance benchmarks for the solver
//!
//! Run with: cargo bench --bench solver_benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use goap_planner::{Action, Condition, CostWeights, PriorityQueue, Solver, State, StateDiff};
use std::time::Duration;

fn generate_state() -> State {
    State::new()
        .with("int", 0)
        .with("float", 0.0)
        .with("double", 0.0)
        .with("boolean", false)
}

fn generate_solver() -> Solver {
    let mut solver = Solver::new();
    let actions = [
        Action::builder("#1 increase int")
            .with_diff(StateDiff::add("int", 1))
            .with_cost(1.0)
            .build(),
        Action::builder("#2 increase float")
            .with_precondition(Condition::gt("int", 2))
            .with_diff(StateDiff::add("float", 1.0))
            .with_cost(2.0)
            .build(),
        Action::builder("#3 increase double and switch boolean")
            .with_diff(StateDiff::add("double", 1.0))
            .with_diff(StateDiff::map("boolean", [(false, true), (true, false)]))
            .with_cost(3.0)
            .build(),
    ];
    for action in actions {
        solver.add_action(action.unwrap()).unwrap();
    }
    solver
}

/// Benchmark solving towards goals of increasing distance
fn bench_solve_depth(c: &mut Criterion) {
    let solver = generate_solver();
    let state = generate_state();
    let mut group = c.benchmark_group("solve_depth");

    for target in [2, 4, 8].iter() {
        let goal = Condition::ge("int", *target);
        group.bench_with_input(BenchmarkId::from_parameter(target), target, |b, _| {
            b.iter(|| {
                solver
                    .solve(
                        std::hint::black_box(&state),
                        std::hint::black_box(&goal),
                        10,
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark a search that exhausts the depth bound
fn bench_solve_unreachable(c: &mut Criterion) {
    let solver = generate_solver();
    let state = generate_state();
    let goal = Condition::eq("int", -1);

    c.bench_function("solve_unreachable", |b| {
        b.iter(|| {
            solver
                .solve(std::hint::black_box(&state), std::hint::black_box(&goal), 6)
                .unwrap()
        });
    });
}

/// Benchmark heuristic evaluation of a composite goal
fn bench_estimate_cost(c: &mut Criterion) {
    let solver = generate_solver();
    let state = generate_state();
    let weights: CostWeights = solver.weights(&state);
    let goal = Condition::and([
        Condition::ge("double", 0.1),
        Condition::or([Condition::eq("boolean", false), Condition::not(Condition::gt("int", 2))]),
    ]);

    c.bench_function("estimate_cost", |b| {
        b.iter(|| {
            goal.estimate_cost(std::hint::black_box(&state), std::hint::black_box(&weights))
                .unwrap()
        });
    });
}

/// Benchmark priority queue churn
fn bench_priority_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_queue");

    for size in [64u64, 1024, 16384].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut queue = PriorityQueue::with_capacity(size as usize);
                for i in 0..size {
                    queue.enqueue(std::hint::black_box(i.wrapping_mul(2654435761) % size));
                }
                while !queue.is_empty() {
                    std::hint::black_box(queue.dequeue().unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets =
        bench_solve_depth,
        bench_solve_unreachable,
        bench_estimate_cost,
        bench_priority_queue
}

criterion_main!(benches);
