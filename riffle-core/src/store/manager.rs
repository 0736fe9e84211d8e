//! Single-writer coordinator for the transition table and the schemes.
use super::{DataStore, TransitionBatch};
use crate::{transport::EntryReceiver, BatchData, RemovalScheme, SampleScheme, Transition};
use log::trace;

/// Owns the transition table and keeps eviction and sampling in lockstep.
///
/// All mutation of the table and the segment trees happens on the thread
/// driving this struct; producers and the learner only ever reach it through
/// transport channels, so no internal locking is needed. Priority feedback
/// from the learner must be funneled back through
/// [`update_priorities`](Self::update_priorities) on the same thread.
pub struct DataManager<O, A, S, R>
where
    O: BatchData,
    A: BatchData,
    S: SampleScheme,
    R: RemovalScheme,
{
    store: DataStore<O, A>,
    removal_scheme: R,
    sample_scheme: S,
    entry_pipes: Vec<EntryReceiver<Transition<O, A>>>,
    next_id: u64,
}

impl<O, A, S, R> DataManager<O, A, S, R>
where
    O: BatchData,
    A: BatchData,
    S: SampleScheme,
    R: RemovalScheme,
{
    /// Creates a manager over per-producer entry pipes.
    ///
    /// `example` fixes the transition schema for the table columns;
    /// `max_entries` is the table capacity.
    pub fn new(
        entry_pipes: Vec<EntryReceiver<Transition<O, A>>>,
        example: &Transition<O, A>,
        removal_scheme: R,
        sample_scheme: S,
        max_entries: usize,
    ) -> Self {
        Self {
            store: DataStore::build(max_entries, example),
            removal_scheme,
            sample_scheme,
            entry_pipes,
            next_id: 0,
        }
    }

    /// Number of live transitions.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.store.len(), self.sample_scheme.len());
        self.store.len()
    }

    /// Whether no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drains all pending inbound transitions without blocking.
    ///
    /// For each record: if the table is full, the removal scheme picks a
    /// victim which is evicted from both the table and the sampling scheme;
    /// the record is then inserted under a fresh logical id and registered
    /// with both schemes.
    pub fn receive_new_entries(&mut self) {
        for i in 0..self.entry_pipes.len() {
            while let Some(tr) = self.entry_pipes[i].get() {
                self.insert(tr);
            }
        }
    }

    fn insert(&mut self, tr: Transition<O, A>) {
        if self.store.is_full() {
            let victim = self
                .removal_scheme
                .next_to_remove()
                .expect("full store but the removal scheme tracks nothing");
            self.store.remove(victim);
            self.sample_scheme.remove(victim);
            trace!("evicted id {}", victim);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.store.insert(id, &tr);
        self.removal_scheme.on_insert(id);
        self.sample_scheme.add(id);
    }

    /// Samples a batch of `batch_size` transitions.
    ///
    /// Returns `None` while not enough data is live; callers poll again
    /// later rather than treating this as a failure.
    pub fn sample_data(&mut self, batch_size: usize) -> Option<TransitionBatch<O, A>> {
        let sampled = self.sample_scheme.sample(batch_size)?;
        Some(self.store.gather(sampled))
    }

    /// Applies priority feedback computed by the learner.
    pub fn update_priorities(&mut self, ids: &[u64], td_errs: &[f32]) {
        self.sample_scheme.update_weights(ids, td_errs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        array::ArrayBatch,
        selectors::{
            BetaSchedule, DensityConfig, DensitySampleScheme, FifoRemoval, UniformSampleScheme,
        },
        transport::entry_pipe,
    };
    use ndarray::{ArrayD, IxDyn};
    use std::collections::HashSet;

    type Tr = Transition<ArrayBatch, ArrayBatch>;

    fn transition(v: f32) -> Tr {
        Transition {
            obs: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 2]), v)),
            act: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 1]), v)),
            next_obs: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 2]), v + 1.0)),
            reward: v,
            is_done: 0,
        }
    }

    fn uniform_manager(
        capacity: usize,
    ) -> (
        DataManager<ArrayBatch, ArrayBatch, UniformSampleScheme, FifoRemoval>,
        crate::transport::EntrySender<Tr>,
    ) {
        let (tx, rx) = entry_pipe();
        let manager = DataManager::new(
            vec![rx],
            &transition(0.0),
            FifoRemoval::new(),
            UniformSampleScheme::new(42),
            capacity,
        );
        (manager, tx)
    }

    #[test]
    fn fifo_eviction_drops_the_oldest_id() {
        let (mut manager, tx) = uniform_manager(4);

        // Pipes hold one record, so drain after each store.
        for v in 0..5 {
            tx.store(transition(v as f32));
            manager.receive_new_entries();
        }
        assert_eq!(manager.len(), 4);

        // Ids 0..5 were assigned in order; id 0 must be gone.
        let batch = manager.sample_data(4).unwrap();
        let live: HashSet<u64> = batch.ids.unwrap().into_iter().collect();
        assert_eq!(live, [1u64, 2, 3, 4].iter().cloned().collect());
        assert!(batch.weights.is_none());
        assert_eq!(
            batch.reward.iter().cloned().fold(f32::MIN, f32::max),
            4.0
        );
    }

    #[test]
    fn sample_returns_none_during_warm_up() {
        let (mut manager, tx) = uniform_manager(8);
        tx.store(transition(1.0));
        manager.receive_new_entries();

        assert!(manager.sample_data(2).is_none());
        tx.store(transition(2.0));
        manager.receive_new_entries();
        assert!(manager.sample_data(2).is_some());
    }

    #[test]
    fn store_and_scheme_agree_on_live_count() {
        let (mut manager, tx) = uniform_manager(3);
        for v in 0..10 {
            tx.store(transition(v as f32));
            manager.receive_new_entries();
            // len() debug-asserts that both sides agree.
            assert_eq!(manager.len(), (v + 1).min(3));
        }
    }

    #[test]
    fn priority_feedback_reshapes_sampling() {
        let (tx, rx) = entry_pipe();
        let scheme = DensitySampleScheme::build(
            &DensityConfig::default()
                .capacity(4)
                .alpha(1.0)
                .epsilon(0.0)
                .beta(BetaSchedule::constant(1.0))
                .seed(7),
        );
        let mut manager =
            DataManager::new(vec![rx], &transition(0.0), FifoRemoval::new(), scheme, 4);

        for v in 0..4 {
            tx.store(transition(v as f32));
            manager.receive_new_entries();
        }
        manager.update_priorities(&[0, 1, 2, 3], &[1.0, 1.0, 1.0, 100.0]);

        let mut hits = 0;
        let trials = 2000;
        for _ in 0..trials {
            let batch = manager.sample_data(1).unwrap();
            if batch.ids.unwrap()[0] == 3 {
                hits += 1;
            }
        }
        let freq = hits as f64 / trials as f64;
        assert!((freq - 100.0 / 103.0).abs() < 0.05, "freq = {}", freq);

        let batch = manager.sample_data(4).unwrap();
        assert!(batch.weights.is_some());
    }
}
