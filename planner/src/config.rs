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

use crate::error::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use std::num::ParseIntError;
use std::str::FromStr;

/// Solver settings loadable from YAML.
///
/// String fields may reference environment variables (`"${GOAP_MAX_DEPTH:-12}"`).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Depth bound used by [`Solver::solve_default`](crate::Solver::solve_default)
    pub max_depth: EnvField<MaxDepth>,

    /// Cap on node expansions per solve; unbounded when absent
    pub max_expansions: Option<usize>,

    /// Log every successful plan at debug level
    pub log_plans: bool,
}

impl SolverConfig {
    pub fn load(path: &str) -> PlanResult<SolverConfig> {
        let conf = serde_yaml::from_reader(
            std::fs::File::open(path)
                .map_err(|e| PlanError::Config(format!("Failed to open config file: {}", e)))?,
        )
        .map_err(|e| PlanError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(conf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxDepth(usize);

impl MaxDepth {
    pub fn new(depth: usize) -> Self {
        Self(depth)
    }

    pub fn depth(&self) -> usize {
        self.0
    }
}

impl FromStr for MaxDepth {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tracing::debug!("Parsing solver max depth from string: {}", s);
        Ok(Self(usize::from_str(s.trim())?))
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        Self(10)
    }
}

impl std::fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
