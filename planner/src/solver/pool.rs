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
use crate::error::{PlanError, PlanResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Actions available to a solver, keyed by name.
///
/// Iteration follows name order, which fixes the order children are
/// generated in and keeps search results reproducible.
#[derive(Debug, Clone, Default)]
pub struct ActionPool {
    actions: BTreeMap<String, Arc<Action>>,
}

impl ActionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action. Fails if the name is already taken.
    pub fn insert(&mut self, action: Action) -> PlanResult<()> {
        if self.actions.contains_key(action.name()) {
            return Err(PlanError::DuplicateAction(action.name().to_string()));
        }
        self.actions
            .insert(action.name().to_string(), Arc::new(action));
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<Action>> {
        self.actions.remove(name)
    }

    /// Drop the action registered as `name` (if any) and register `action`
    /// under its own name, overwriting whatever holds that name.
    pub fn replace(&mut self, name: &str, action: Action) -> Option<Arc<Action>> {
        let previous = self.actions.remove(name);
        let overwritten = self
            .actions
            .insert(action.name().to_string(), Arc::new(action));
        previous.or(overwritten)
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Action>> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::StateDiff;

    fn action(name: &str, cost: f64) -> Action {
        Action::builder(name)
            .with_diff(StateDiff::add("int", 1))
            .with_cost(cost)
            .build()
            .unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut pool = ActionPool::new();
        pool.insert(action("step", 1.0)).unwrap();
        assert_eq!(
            pool.insert(action("step", 2.0)),
            Err(PlanError::DuplicateAction("step".to_string()))
        );
        assert_eq!(pool.get("step").unwrap().cost(), 1.0);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut pool = ActionPool::new();
        pool.insert(action("step", 1.0)).unwrap();

        let previous = pool.replace("step", action("step", 5.0)).unwrap();
        assert_eq!(previous.cost(), 1.0);
        assert_eq!(pool.get("step").unwrap().cost(), 5.0);

        assert!(pool.replace("missing", action("jump", 2.0)).is_none());
        assert_eq!(pool.len(), 2);

        assert!(pool.remove("jump").is_some());
        assert!(pool.remove("jump").is_none());
        pool.clear();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut pool = ActionPool::new();
        for name in ["c", "a", "b"] {
            pool.insert(action(name, 1.0)).unwrap();
        }
        let names: Vec<_> = pool.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
