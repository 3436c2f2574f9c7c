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

//! Binary min-heap used as the A* open set

use crate::error::{PlanError, PlanResult};

/// Min-heap priority queue; the smallest element is dequeued first.
///
/// There is no decrease-key: entries are immutable once queued and stale
/// entries are discarded by the caller when dequeued.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    elements: Vec<T>,
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Smallest element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Push an element and restore the heap property upward.
    pub fn enqueue(&mut self, item: T) {
        self.elements.push(item);
        let mut child = self.elements.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.elements[child] >= self.elements[parent] {
                break;
            }
            self.elements.swap(child, parent);
            child = parent;
        }
    }

    /// Remove and return the smallest element.
    pub fn dequeue(&mut self) -> PlanResult<T> {
        if self.elements.is_empty() {
            return Err(PlanError::QueueEmpty);
        }

        let result = self.elements.swap_remove(0);
        let len = self.elements.len();
        let mut parent = 0;
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            let mut smallest = parent;

            if left < len && self.elements[left] < self.elements[smallest] {
                smallest = left;
            }
            if right < len && self.elements[right] < self.elements[smallest] {
                smallest = right;
            }
            if smallest == parent {
                break;
            }

            self.elements.swap(parent, smallest);
            parent = smallest;
        }

        Ok(result)
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}
