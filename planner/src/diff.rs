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

//! Single-index state mutations

use crate::error::{PlanError, PlanResult};
use crate::state::State;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Magnitude reported by diffs that are not a linear quantity.
const UNIT_DIFF: f64 = 1.0;

/// An atomic mutation of one state index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateDiff {
    /// Add `delta` to a numeric value. Overflow is an error.
    Add { index: String, delta: Value },
    /// Replace the current value by its entry in `table`, if it has one.
    Map {
        index: String,
        table: Vec<(Value, Value)>,
    },
    /// Overwrite the value.
    Set { index: String, value: Value },
}

impl StateDiff {
    pub fn add(index: impl Into<String>, delta: impl Into<Value>) -> Self {
        StateDiff::Add {
            index: index.into(),
            delta: delta.into(),
        }
    }

    pub fn map<K, V>(index: impl Into<String>, table: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        StateDiff::Map {
            index: index.into(),
            table: table
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    pub fn set(index: impl Into<String>, value: impl Into<Value>) -> Self {
        StateDiff::Set {
            index: index.into(),
            value: value.into(),
        }
    }

    /// State index this diff mutates
    pub fn index(&self) -> &str {
        match self {
            StateDiff::Add { index, .. } | StateDiff::Map { index, .. } | StateDiff::Set { index, .. } => {
                index
            }
        }
    }

    /// Nominal size of one application, used to derive cost weights.
    pub fn diff(&self) -> f64 {
        match self {
            StateDiff::Add { delta, .. } => delta.as_float().map(f64::abs).unwrap_or(UNIT_DIFF),
            StateDiff::Map { .. } | StateDiff::Set { .. } => UNIT_DIFF,
        }
    }

    /// Reject diffs that can never apply cleanly.
    pub fn validate(&self) -> PlanResult<()> {
        match self {
            StateDiff::Add { index, delta } => {
                if !delta.kind().is_numeric() {
                    return Err(invalid(index, format!("cannot add a {} value", delta.kind())));
                }
                if self.diff() == 0.0 {
                    return Err(invalid(index, "addition of zero never changes the state"));
                }
                if !self.diff().is_finite() {
                    return Err(invalid(index, "addition must be finite"));
                }
                Ok(())
            }
            StateDiff::Map { index, table } => {
                let Some((first, _)) = table.first() else {
                    return Ok(());
                };
                let kind = first.kind();
                for (i, (from, to)) in table.iter().enumerate() {
                    if from.kind() != kind || to.kind() != kind {
                        return Err(invalid(index, format!("mapping table mixes kinds with {}", kind)));
                    }
                    if table[..i].iter().any(|(seen, _)| seen == from) {
                        return Err(invalid(index, format!("mapping table has key {} twice", from)));
                    }
                }
                Ok(())
            }
            StateDiff::Set { .. } => Ok(()),
        }
    }

    /// Apply the mutation to `state` in place.
    pub fn apply(&self, state: &mut State) -> PlanResult<()> {
        match self {
            StateDiff::Add { index, delta } => {
                let stored = state.get(index)?;
                stored.ensure_same_kind(delta).map_err(|e| e.at(index))?;
                let next = match (stored, delta) {
                    (Value::Int(a), Value::Int(b)) => a
                        .checked_add(*b)
                        .map(Value::Int)
                        .ok_or_else(|| invalid(index, format!("{} + {} overflows", a, b)))?,
                    (Value::Float(a), Value::Float(b)) => {
                        let sum = a + b;
                        if !sum.is_finite() {
                            return Err(invalid(index, format!("{} + {} is not finite", a, b)));
                        }
                        Value::Float(sum)
                    }
                    _ => return Err(invalid(index, format!("cannot add to a {} value", stored.kind()))),
                };
                state.set(index.as_str(), next);
            }
            StateDiff::Map { index, table } => {
                let stored = state.get(index)?;
                let mut next = None;
                for (from, to) in table {
                    stored.ensure_same_kind(from).map_err(|e| e.at(index))?;
                    if next.is_none() && from == stored {
                        next = Some(to.clone());
                    }
                }
                if let Some(next) = next {
                    state.set(index.as_str(), next);
                }
            }
            StateDiff::Set { index, value } => {
                let stored = state.get(index)?;
                stored.ensure_same_kind(value).map_err(|e| e.at(index))?;
                state.set(index.as_str(), value.clone());
            }
        }
        Ok(())
    }
}

fn invalid(index: &str, reason: impl Into<String>) -> PlanError {
    PlanError::InvalidDiff {
        index: index.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn sample_state() -> State {
        State::new()
            .with("int", 0)
            .with("float", 0.0)
            .with("boolean", false)
            .with("place", "home")
    }

    #[test]
    fn test_add_int_and_float() {
        let mut state = sample_state();
        StateDiff::add("int", 2).apply(&mut state).unwrap();
        StateDiff::add("float", 0.25).apply(&mut state).unwrap();
        StateDiff::add("float", 0.25).apply(&mut state).unwrap();
        assert_eq!(state.get("int").unwrap(), &Value::Int(2));
        assert_eq!(state.get("float").unwrap(), &Value::Float(0.5));
    }

    #[test]
    fn test_add_int_is_exact() {
        let big = (1i64 << 53) + 1;
        let mut state = State::new().with("int", big);
        StateDiff::add("int", 1).apply(&mut state).unwrap();
        assert_eq!(state.get("int").unwrap(), &Value::Int(big + 1));
    }

    #[test]
    fn test_add_overflow_is_invalid() {
        let mut state = State::new().with("int", i64::MAX).with("float", f64::MAX);
        let err = StateDiff::add("int", 1).apply(&mut state).unwrap_err();
        assert!(matches!(err, PlanError::InvalidDiff { ref index, .. } if index == "int"));
        assert_eq!(state.get("int").unwrap(), &Value::Int(i64::MAX));

        let err = StateDiff::add("float", f64::MAX).apply(&mut state).unwrap_err();
        assert!(matches!(err, PlanError::InvalidDiff { ref index, .. } if index == "float"));
    }

    #[test]
    fn test_add_reports_magnitude() {
        assert_eq!(StateDiff::add("int", -3).diff(), 3.0);
        assert_eq!(StateDiff::add("float", 0.5).diff(), 0.5);
        assert_eq!(StateDiff::set("int", 1).diff(), 1.0);
        assert_eq!(StateDiff::map("boolean", [(false, true)]).diff(), 1.0);
    }

    #[test]
    fn test_add_kind_mismatch() {
        let mut state = sample_state();
        let err = StateDiff::add("int", 1.0).apply(&mut state).unwrap_err();
        assert_eq!(
            err,
            PlanError::TypeMismatch {
                index: "int".to_string(),
                expected: ValueKind::Float,
                found: ValueKind::Int,
            }
        );
        assert_eq!(state, sample_state());
    }

    #[test]
    fn test_map_toggles_and_ignores_unknown_values() {
        let toggle = StateDiff::map("boolean", [(false, true), (true, false)]);
        let mut state = sample_state();
        toggle.apply(&mut state).unwrap();
        assert_eq!(state.get("boolean").unwrap(), &Value::Bool(true));
        toggle.apply(&mut state).unwrap();
        assert_eq!(state.get("boolean").unwrap(), &Value::Bool(false));

        let travel = StateDiff::map("place", [("work", "home")]);
        travel.apply(&mut state).unwrap();
        assert_eq!(state.get("place").unwrap(), &Value::from("home"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut state = sample_state();
        StateDiff::set("place", "work").apply(&mut state).unwrap();
        assert_eq!(state.get("place").unwrap(), &Value::from("work"));
        assert!(StateDiff::set("place", 1).apply(&mut state).is_err());
    }

    #[test]
    fn test_missing_index() {
        let mut state = sample_state();
        assert_eq!(
            StateDiff::add("ammo", 1).apply(&mut state),
            Err(PlanError::NotFound("ammo".to_string()))
        );
    }

    #[test]
    fn test_validate() {
        assert!(StateDiff::add("int", 1).validate().is_ok());
        assert!(StateDiff::add("int", 0).validate().is_err());
        assert!(StateDiff::add("boolean", true).validate().is_err());
        assert!(StateDiff::add("float", f64::NAN).validate().is_err());
        assert!(StateDiff::map("boolean", [(false, true), (true, false)]).validate().is_ok());
        assert!(StateDiff::map("boolean", [(false, true), (false, false)]).validate().is_err());
        assert!(
            StateDiff::Map {
                index: "int".to_string(),
                table: vec![(Value::Int(1), Value::Float(2.0))],
            }
            .validate()
            .is_err()
        );
    }
}
