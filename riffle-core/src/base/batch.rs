//! Columnar storage trait and the transition record.

/// Fixed-shape columnar storage for one field of a transition.
///
/// Every storage and transport layer is generic over the transition schema
/// through this trait and never inspects field semantics. An implementation
/// owns a contiguous buffer with a leading batch dimension; the shape and
/// dtype behind that dimension are fixed once at setup and must agree across
/// all records pushed into the same buffer.
pub trait BatchData {
    /// Builds an empty buffer able to hold `capacity` records.
    fn new(capacity: usize) -> Self;

    /// Derives a `capacity`-sized buffer from a single-record example,
    /// prefixing the batch dimension to the example's shape.
    fn expand(&self, capacity: usize) -> Self;

    /// Writes the records in `data` starting at index `i`, wrapping around
    /// at the buffer capacity.
    fn push(&mut self, i: usize, data: &Self);

    /// Gathers the records at `ixs` into a new buffer.
    fn sample(&self, ixs: &[usize]) -> Self;

    /// Number of records the buffer holds.
    fn len(&self) -> usize;

    /// Whether the buffer holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One environment step record.
///
/// `obs` and `act` are single-record [`BatchData`] buffers (batch dimension
/// of length 1). A transition is created by an actor, transmitted once,
/// inserted into exactly one slot of the store, sampled zero or more times
/// and eventually evicted.
#[derive(Clone, Debug)]
pub struct Transition<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Observation before the step.
    pub obs: O,

    /// Action taken.
    pub act: A,

    /// Observation after the step.
    pub next_obs: O,

    /// Reward.
    pub reward: f32,

    /// Flag denoting the end of an episode.
    pub is_done: i8,
}
