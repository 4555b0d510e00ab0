//! Min-priority queue over column handles.
//!
//! Columns are keyed by `(height, index)`: the shortest column comes out
//! first, and among equal heights the lowest index wins. Heights only grow,
//! so there is no decrease-key; a column is popped, updated, and pushed back.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Priority key for one column. `slot` is the position in the caller's
/// column vector, which equals `index - 1`.
#[derive(Debug, Clone, Copy)]
pub(super) struct ColumnKey {
    pub height: f64,
    pub slot: usize,
}

impl PartialEq for ColumnKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ColumnKey {}

impl PartialOrd for ColumnKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColumnKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then(self.slot.cmp(&other.slot))
    }
}

#[derive(Debug, Default)]
pub(super) struct ColumnQueue {
    heap: BinaryHeap<Reverse<ColumnKey>>,
}

impl ColumnQueue {
    /// Queue with `count` columns, all at height zero.
    pub fn with_columns(count: usize) -> Self {
        let heap = (0..count)
            .map(|slot| Reverse(ColumnKey { height: 0.0, slot }))
            .collect();
        Self { heap }
    }

    /// Remove and return the shortest column.
    pub fn pop_shortest(&mut self) -> Option<ColumnKey> {
        self.heap.pop().map(|Reverse(key)| key)
    }

    pub fn push(&mut self, key: ColumnKey) {
        self.heap.push(Reverse(key));
    }

    /// Drain into a vector ordered shortest first.
    pub fn into_ascending(self) -> Vec<ColumnKey> {
        let mut keys: Vec<ColumnKey> = self.heap.into_iter().map(|Reverse(k)| k).collect();
        keys.sort();
        keys
    }
}
