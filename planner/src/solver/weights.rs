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

//! Per-index cost weights derived from the action pool

use super::pool::ActionPool;
use crate::condition::CostWeights;
use crate::state::State;

/// Largest `|cost / diff|` seen for each state index of `current`.
///
/// Indices no action touches, and indices missing from `current`, get no
/// entry and fall back to the default weight when a condition reads them.
/// Zero-cost actions give weight `0.0`.
pub(crate) fn derive_weights(pool: &ActionPool, current: &State) -> CostWeights {
    let mut weights = CostWeights::new();
    for action in pool.iter() {
        for diff in action.diffs() {
            if !current.contains(diff.index()) {
                continue;
            }
            let cost_per_diff = (action.cost() / diff.diff()).abs();
            weights.raise(diff.index(), cost_per_diff);
        }
    }
    weights
}
