//! A batch of transitions assembled for consumption.
use crate::BatchData;

/// A contiguous batch of sampled transitions.
///
/// Produced by [`DataManager::sample_data`](super::DataManager::sample_data)
/// and consumed by the learner. `ids` carries the logical ids backing each
/// row so priority feedback can refer to them; `weights` carries importance
/// weights when the sampling scheme is prioritized.
pub struct TransitionBatch<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Observations.
    pub obs: O,

    /// Actions.
    pub act: A,

    /// Next observations.
    pub next_obs: O,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Episode-end flags.
    pub is_done: Vec<i8>,

    /// Logical ids of the sampled rows.
    pub ids: Option<Vec<u64>>,

    /// Importance weights in `(0, 1]`.
    pub weights: Option<Vec<f32>>,
}

impl<O, A> TransitionBatch<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Decomposes the batch into its fields.
    #[allow(clippy::type_complexity)]
    pub fn unpack(
        self,
    ) -> (
        O,
        A,
        O,
        Vec<f32>,
        Vec<i8>,
        Option<Vec<u64>>,
        Option<Vec<f32>>,
    ) {
        (
            self.obs,
            self.act,
            self.next_obs,
            self.reward,
            self.is_done,
            self.ids,
            self.weights,
        )
    }
}
