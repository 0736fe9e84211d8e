//! First-in-first-out eviction.
use crate::RemovalScheme;
use std::collections::{HashSet, VecDeque};

/// Evicts ids in strict insertion order.
///
/// Access never reorders anything, which distinguishes this from an LRU
/// policy. Ids the store drops on its own are forgotten lazily: they stay in
/// the insertion ring until they reach the front.
#[derive(Debug, Default)]
pub struct FifoRemoval {
    order: VecDeque<u64>,
    live: HashSet<u64>,
}

impl FifoRemoval {
    /// Creates an empty scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids currently tracked.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl RemovalScheme for FifoRemoval {
    fn on_insert(&mut self, id: u64) {
        self.order.push_back(id);
        self.live.insert(id);
    }

    fn on_remove(&mut self, id: u64) {
        self.live.remove(&id);
    }

    /// Pops the oldest still-live id, untracking it.
    fn next_to_remove(&mut self) -> Option<u64> {
        while let Some(id) = self.order.pop_front() {
            if self.live.remove(&id) {
                return Some(id);
            }
        }
        None
    }
}
