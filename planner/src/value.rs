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

//! Typed values stored in a world state
//!
//! A [`Value`] is one of a closed set of scalar kinds. Values of different
//! kinds never compare against each other; doing so yields a
//! [`KindMismatch`] which callers turn into
//! [`PlanError::TypeMismatch`](crate::PlanError::TypeMismatch).
//!
//! Conversions between representations are explicit:
//!
//! | from    | `as_bool`  | `as_int`          | `as_float` |
//! |---------|------------|-------------------|------------|
//! | `Bool`  | identity   | `1` / `0`         | `1.0` / `0.0` |
//! | `Int`   | `>= 1`     | identity          | widened    |
//! | `Float` | `>= 0.5`   | rounded to nearest| identity   |
//! | `Symbol`| `None`     | `None`            | `None`     |

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tolerance used when comparing floating point values.
pub const EPSILON: f64 = 1e-4;

/// Threshold at which a number reads back as `true`.
const BOOL_THRESHOLD: f64 = 0.5;

/// Tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Symbol,
}

impl ValueKind {
    /// Whether values of this kind have a numeric distance.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Int => write!(f, "int"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// Two values of different kinds met in one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

impl KindMismatch {
    /// Attach the state index the mismatch was found at.
    pub fn at(self, index: &str) -> PlanError {
        PlanError::TypeMismatch {
            index: index.to_string(),
            expected: self.expected,
            found: self.found,
        }
    }
}

/// A single world-state value
///
/// `Eq` and `Hash` are exact, with `-0.0` equal to `0.0`. Use
/// [`approx_eq`](Self::approx_eq) for tolerant float comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Any other equatable, orderable scalar (a location, a mode, ...).
    Symbol(String),
}

impl Value {
    /// Kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Symbol(_) => ValueKind::Symbol,
        }
    }

    /// Read as a boolean. Numbers are `true` from `0.5` upward.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i as f64 >= BOOL_THRESHOLD),
            Value::Float(x) => Some(*x >= BOOL_THRESHOLD),
            Value::Symbol(_) => None,
        }
    }

    /// Read as an integer. Floats round to the nearest integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::Float(x) => Some(x.round() as i64),
            Value::Symbol(_) => None,
        }
    }

    /// Read as a float. Integers widen, booleans map to `1.0` / `0.0`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Symbol(_) => None,
        }
    }

    /// Read as a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Build a value of `kind` from a number, using the conversion rules of
    /// [`as_bool`](Self::as_bool) and [`as_int`](Self::as_int).
    pub fn from_number(kind: ValueKind, number: f64) -> Option<Value> {
        let widened = Value::Float(number);
        match kind {
            ValueKind::Bool => widened.as_bool().map(Value::Bool),
            ValueKind::Int => widened.as_int().map(Value::Int),
            ValueKind::Float => Some(widened),
            ValueKind::Symbol => None,
        }
    }

    /// Fails unless `other` has the same kind as `self`.
    pub fn ensure_same_kind(&self, other: &Value) -> Result<(), KindMismatch> {
        if self.kind() == other.kind() {
            Ok(())
        } else {
            Err(KindMismatch {
                expected: other.kind(),
                found: self.kind(),
            })
        }
    }

    /// Equality with float tolerance.
    pub fn approx_eq(&self, other: &Value) -> Result<bool, KindMismatch> {
        self.ensure_same_kind(other)?;
        Ok(match (self, other) {
            (Value::Float(a), Value::Float(b)) => (a - b).abs() < EPSILON,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            _ => unreachable!("kinds checked above"),
        })
    }

    /// Ordering of `self` relative to `other`.
    ///
    /// Returns `Ok(None)` for booleans, which have no ordering.
    pub fn ordering(&self, other: &Value) -> Result<Option<Ordering>, KindMismatch> {
        self.ensure_same_kind(other)?;
        Ok(match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Some(a.total_cmp(b)),
            (Value::Symbol(a), Value::Symbol(b)) => Some(a.cmp(b)),
            _ => None,
        })
    }

    /// Distance between two values of the same kind.
    ///
    /// Numbers use their absolute difference; booleans and symbols are
    /// `0.0` apart when equal and `1.0` otherwise.
    pub fn distance(&self, other: &Value) -> Result<f64, KindMismatch> {
        self.ensure_same_kind(other)?;
        Ok(match (self, other) {
            (Value::Int(a), Value::Int(b)) => (*a as f64 - *b as f64).abs(),
            (Value::Float(a), Value::Float(b)) => (a - b).abs(),
            _ => {
                if self.approx_eq(other)? {
                    0.0
                } else {
                    1.0
                }
            }
        })
    }
}

/// Bit pattern of a float with `-0.0` folded into `0.0`.
fn float_bits(x: f64) -> u64 {
    if x == 0.0 { 0.0f64.to_bits() } else { x.to_bits() }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(x) => float_bits(*x).hash(state),
            Value::Symbol(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Symbol(s) => write!(f, ":{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Symbol(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Symbol(value)
    }
}
