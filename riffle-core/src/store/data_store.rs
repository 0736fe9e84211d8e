//! The fixed-capacity transition table.
use super::TransitionBatch;
use crate::{BatchData, SampledIds, Transition};
use std::collections::HashMap;

/// Columnar table holding at most `capacity` live transitions.
///
/// Each occupied slot holds exactly one transition record and is keyed by a
/// logical id; a slot is reused only after its id has been explicitly
/// removed. The table never samples by itself; a sampling scheme picks ids
/// and [`gather`](Self::gather) assembles the rows.
pub struct DataStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    capacity: usize,
    obs: O,
    act: A,
    next_obs: O,
    reward: Vec<f32>,
    is_done: Vec<i8>,
    /// Slot index to logical id, meaningful for occupied slots only.
    slot_ids: Vec<u64>,
    id_to_slot: HashMap<u64, usize>,
    free: Vec<usize>,
}

impl<O, A> DataStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Builds a table sized for `capacity` records, deriving the column
    /// layout from a transition example.
    pub fn build(capacity: usize, example: &Transition<O, A>) -> Self {
        Self {
            capacity,
            obs: example.obs.expand(capacity),
            act: example.act.expand(capacity),
            next_obs: example.next_obs.expand(capacity),
            reward: vec![0.0; capacity],
            is_done: vec![0; capacity],
            slot_ids: vec![0; capacity],
            id_to_slot: HashMap::new(),
            free: (0..capacity).rev().collect(),
        }
    }

    /// Number of live transitions.
    pub fn len(&self) -> usize {
        self.capacity - self.free.len()
    }

    /// Whether no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Maximum number of transitions the table can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `id` currently occupies a slot.
    pub fn contains(&self, id: u64) -> bool {
        self.id_to_slot.contains_key(&id)
    }

    /// Stores a transition under a fresh logical id.
    ///
    /// Panics if the table is full; the caller must evict first.
    pub fn insert(&mut self, id: u64, tr: &Transition<O, A>) {
        let slot = self
            .free
            .pop()
            .expect("inserting into a full data store, evict an id first");

        self.obs.push(slot, &tr.obs);
        self.act.push(slot, &tr.act);
        self.next_obs.push(slot, &tr.next_obs);
        self.reward[slot] = tr.reward;
        self.is_done[slot] = tr.is_done;
        self.slot_ids[slot] = id;
        self.id_to_slot.insert(id, slot);
    }

    /// Frees the slot occupied by `id`, destroying its content.
    ///
    /// Returns `false` if the id is not live.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.id_to_slot.remove(&id) {
            Some(slot) => {
                self.free.push(slot);
                true
            }
            None => false,
        }
    }

    /// Assembles the records behind `sampled.ids` into one contiguous batch.
    ///
    /// Panics if any id is not live; sampling schemes only return live ids,
    /// so this indicates the scheme and the table fell out of lockstep.
    pub fn gather(&self, sampled: SampledIds) -> TransitionBatch<O, A> {
        let ixs: Vec<usize> = sampled
            .ids
            .iter()
            .map(|id| {
                *self
                    .id_to_slot
                    .get(id)
                    .expect("sampled id is not live in the data store")
            })
            .collect();

        TransitionBatch {
            obs: self.obs.sample(&ixs),
            act: self.act.sample(&ixs),
            next_obs: self.next_obs.sample(&ixs),
            reward: ixs.iter().map(|&ix| self.reward[ix]).collect(),
            is_done: ixs.iter().map(|&ix| self.is_done[ix]).collect(),
            ids: Some(sampled.ids),
            weights: sampled.weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayBatch;
    use ndarray::{ArrayD, IxDyn};

    fn transition(v: f32, done: i8) -> Transition<ArrayBatch, ArrayBatch> {
        Transition {
            obs: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 2]), v)),
            act: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 1]), v + 0.5)),
            next_obs: ArrayBatch::from(ArrayD::from_elem(IxDyn(&[1, 2]), v + 1.0)),
            reward: v,
            is_done: done,
        }
    }

    #[test]
    fn insert_remove_and_slot_reuse() {
        let mut store = DataStore::build(2, &transition(0.0, 0));
        store.insert(0, &transition(1.0, 0));
        store.insert(1, &transition(2.0, 0));
        assert!(store.is_full());

        assert!(store.remove(0));
        assert!(!store.remove(0));
        assert_eq!(store.len(), 1);

        store.insert(2, &transition(3.0, 1));
        assert!(store.is_full());
        assert!(store.contains(2));
        assert!(!store.contains(0));
    }

    #[test]
    #[should_panic]
    fn insert_into_full_store_panics() {
        let mut store = DataStore::build(1, &transition(0.0, 0));
        store.insert(0, &transition(1.0, 0));
        store.insert(1, &transition(2.0, 0));
    }

    #[test]
    fn gather_returns_records_field_for_field() {
        let mut store = DataStore::build(4, &transition(0.0, 0));
        for id in 0..4u64 {
            store.insert(id, &transition(id as f32, (id % 2) as i8));
        }

        let batch = store.gather(SampledIds {
            ids: vec![3, 1],
            weights: Some(vec![1.0, 0.5]),
        });

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.reward, vec![3.0, 1.0]);
        assert_eq!(batch.is_done, vec![1, 1]);
        assert_eq!(batch.obs.array().unwrap()[[0, 0]], 3.0);
        assert_eq!(batch.next_obs.array().unwrap()[[1, 1]], 2.0);
        assert_eq!(batch.ids, Some(vec![3, 1]));
        assert_eq!(batch.weights, Some(vec![1.0, 0.5]));
    }
}
