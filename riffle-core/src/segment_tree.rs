//! Segment trees for priority-weighted sampling.
//!
//! The sum variant is hand-rolled as a flat array because weighted sampling
//! needs [`find_prefix_index`](SumTree::find_prefix_index), a prefix-sum
//! descent the [`segment_tree`] crate does not expose. The min variant, only
//! needed for range-min queries, is the crate's [`SegmentPoint`] over
//! [`MinIgnoreNaN`].
use segment_tree::{ops::MinIgnoreNaN, SegmentPoint};

/// Min tree over `f32` leaves.
///
/// Leaves beyond the live region must keep their initial `f32::MAX` so they
/// never win a range-min query.
pub type MinTree = SegmentPoint<f32, MinIgnoreNaN>;

/// Builds a [`MinTree`] with all `capacity` leaves at `f32::MAX`.
pub fn min_tree(capacity: usize) -> MinTree {
    SegmentPoint::build(vec![f32::MAX; capacity], MinIgnoreNaN)
}

/// Rounds `n` up to the next power of two, which both tree variants require
/// for their leaf count.
pub fn tree_capacity(n: usize) -> usize {
    let mut c = 1;
    while c < n {
        c *= 2;
    }
    c
}

/// Sum tree over a power-of-two number of `f32` leaves.
///
/// Stored as a contiguous array of `2 * capacity - 1` nodes with children at
/// `2i + 1` and `2i + 2`; leaves occupy the last `capacity` slots. Point
/// updates and range queries are O(log capacity). Leaves beyond the live
/// region must hold `0.0` so they never affect aggregates or get selected.
#[derive(Debug)]
pub struct SumTree {
    capacity: usize,
    tree: Vec<f32>,
}

impl SumTree {
    /// Creates a tree with at least `n` leaves, all zero.
    pub fn new(n: usize) -> Self {
        let capacity = tree_capacity(n);
        Self {
            capacity,
            tree: vec![0f32; 2 * capacity - 1],
        }
    }

    /// Number of leaves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current value of leaf `ix`.
    pub fn get(&self, ix: usize) -> f32 {
        debug_assert!(ix < self.capacity);
        self.tree[ix + self.capacity - 1]
    }

    /// Sum over all leaves.
    pub fn total(&self) -> f32 {
        self.tree[0]
    }

    /// Sets leaf `ix` to `value` and recomputes all ancestor sums.
    pub fn update(&mut self, ix: usize, value: f32) {
        debug_assert!(ix < self.capacity);
        let ix = ix + self.capacity - 1;
        let change = value - self.tree[ix];
        self.tree[ix] = value;
        if ix != 0 {
            self.propagate(ix, change);
        }
    }

    fn propagate(&mut self, ix: usize, change: f32) {
        let parent = (ix - 1) / 2;
        self.tree[parent] += change;
        if parent != 0 {
            self.propagate(parent, change);
        }
    }

    /// Sum over the half-open leaf range `[lo, hi)`.
    pub fn query_sum(&self, lo: usize, hi: usize) -> f32 {
        debug_assert!(lo <= hi && hi <= self.capacity);
        self.query_node(0, 0, self.capacity, lo, hi)
    }

    fn query_node(&self, node: usize, node_lo: usize, node_hi: usize, lo: usize, hi: usize) -> f32 {
        if hi <= node_lo || node_hi <= lo {
            return 0.0;
        }
        if lo <= node_lo && node_hi <= hi {
            return self.tree[node];
        }
        let mid = (node_lo + node_hi) / 2;
        self.query_node(2 * node + 1, node_lo, mid, lo, hi)
            + self.query_node(2 * node + 2, mid, node_hi, lo, hi)
    }

    /// Returns the smallest leaf index whose inclusive prefix sum reaches
    /// `mass`, for `mass` in `[0, total())`.
    ///
    /// This is the inverse-CDF primitive behind O(log capacity) weighted
    /// sampling: a uniform mass lands on leaf `i` with probability
    /// proportional to its value. Zero-valued leaves are never selected.
    pub fn find_prefix_index(&self, mass: f32) -> usize {
        let ix = self.retrieve(0, mass);
        debug_assert!(ix >= self.capacity - 1);
        ix + 1 - self.capacity
    }

    /// Batched [`find_prefix_index`](Self::find_prefix_index) for a slice of
    /// masses.
    pub fn find_prefix_indices(&self, masses: &[f32]) -> Vec<usize> {
        masses.iter().map(|&m| self.find_prefix_index(m)).collect()
    }

    fn retrieve(&self, ix: usize, s: f32) -> usize {
        let left = 2 * ix + 1;
        let right = left + 1;

        if left >= self.tree.len() {
            return ix;
        }

        if s <= self.tree[left] || self.tree[right] == 0f32 {
            self.retrieve(left, s)
        } else {
            self.retrieve(right, s - self.tree[left])
        }
    }
}
