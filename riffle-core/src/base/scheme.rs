//! Selection scheme traits: eviction order and batch sampling.

/// Ids drawn by a [`SampleScheme`] for one batch.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledIds {
    /// Logical ids of the sampled transitions. Distinct within one draw.
    pub ids: Vec<u64>,

    /// Importance weights in `(0, 1]`, present for prioritized schemes only.
    pub weights: Option<Vec<f32>>,
}

/// Decides which stored id to evict next.
///
/// The store calls [`on_insert`](Self::on_insert) and
/// [`on_remove`](Self::on_remove) in lockstep with its own mutations so the
/// scheme's bookkeeping never disagrees with the live set.
pub trait RemovalScheme {
    /// Registers a freshly inserted id.
    fn on_insert(&mut self, id: u64);

    /// Forgets an id the store dropped independently. Removing an id that is
    /// not currently tracked is a no-op.
    fn on_remove(&mut self, id: u64);

    /// Returns the next id to evict, or `None` if nothing is tracked.
    fn next_to_remove(&mut self) -> Option<u64>;
}

/// Produces batches of stored ids, optionally with importance weights.
pub trait SampleScheme {
    /// Registers a live id. Panics if the scheme is already at capacity;
    /// callers must remove before adding.
    fn add(&mut self, id: u64);

    /// Unregisters a live id.
    fn remove(&mut self, id: u64);

    /// Draws `batch_size` distinct live ids.
    ///
    /// Returns `None` when fewer than `batch_size` ids are live. This is the
    /// "batch not ready" signal, not an error; callers poll again later.
    fn sample(&mut self, batch_size: usize) -> Option<SampledIds>;

    /// Applies priority feedback for previously sampled ids.
    ///
    /// Panics if `ids` and `td_errs` have different lengths. A no-op for
    /// unprioritized schemes.
    fn update_weights(&mut self, ids: &[u64], td_errs: &[f32]);

    /// Number of ids currently registered.
    fn len(&self) -> usize;

    /// Whether no ids are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
