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

//! World state snapshot used for planning

use crate::error::{PlanError, PlanResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from state index to [`Value`].
///
/// Entries are kept sorted by index so equality and hashing do not depend on
/// insertion order, which lets a `State` key the solver's closed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    values: BTreeMap<String, Value>,
}

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, index: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(index, value);
        self
    }

    /// Read the value at `index`.
    pub fn get(&self, index: &str) -> PlanResult<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| PlanError::NotFound(index.to_string()))
    }

    /// Insert or overwrite the value at `index`.
    pub fn set(&mut self, index: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(index.into(), value.into());
    }

    /// Whether `index` has been set
    pub fn contains(&self, index: &str) -> bool {
        self.values.contains_key(index)
    }

    /// All known state indices, in sorted order.
    pub fn indices(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate index/value pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (index, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", index, value)?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for State {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = State::new();
        for (index, value) in iter {
            state.set(index, value);
        }
        state
    }
}
