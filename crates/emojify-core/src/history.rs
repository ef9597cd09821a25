//! Bounded, most-recent-first history of finished generations.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::config::DEFAULT_MAX_HISTORY;
use crate::generation::GenerationResult;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<GenerationResult>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    /// A history holding at most `capacity` results (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a result to the front, evicting the oldest on overflow.
    ///
    /// Only complete results are kept; returns whether `result` was added.
    pub fn record(&mut self, result: GenerationResult) -> bool {
        if !result.is_complete() {
            return false;
        }
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
        true
    }

    pub fn get(&self, id: Uuid) -> Option<&GenerationResult> {
        self.entries.iter().find(|r| r.id() == id)
    }

    pub fn latest(&self) -> Option<&GenerationResult> {
        self.entries.front()
    }

    /// Results, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
