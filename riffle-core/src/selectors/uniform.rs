//! Uniform sampling without replacement.
use crate::{SampleScheme, SampledIds};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashMap;

/// Draws batches of distinct live ids uniformly at random.
///
/// Live ids sit in a dense vector with swap-remove deletion, so `add`,
/// `remove` and each draw are O(1). No importance weights are produced and
/// priority feedback is ignored.
pub struct UniformSampleScheme {
    ids: Vec<u64>,
    pos: HashMap<u64, usize>,
    rng: StdRng,
}

impl UniformSampleScheme {
    /// Creates a scheme with a seeded RNG for reproducible sampling.
    pub fn new(seed: u64) -> Self {
        Self {
            ids: Vec::new(),
            pos: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SampleScheme for UniformSampleScheme {
    fn add(&mut self, id: u64) {
        debug_assert!(!self.pos.contains_key(&id));
        self.pos.insert(id, self.ids.len());
        self.ids.push(id);
    }

    fn remove(&mut self, id: u64) {
        let ix = match self.pos.remove(&id) {
            Some(ix) => ix,
            None => return,
        };
        let last = self.ids.pop().unwrap();
        if last != id {
            self.ids[ix] = last;
            self.pos.insert(last, ix);
        }
    }

    fn sample(&mut self, batch_size: usize) -> Option<SampledIds> {
        if self.ids.len() < batch_size {
            return None;
        }

        let ids = rand::seq::index::sample(&mut self.rng, self.ids.len(), batch_size)
            .iter()
            .map(|ix| self.ids[ix])
            .collect();

        Some(SampledIds { ids, weights: None })
    }

    fn update_weights(&mut self, _ids: &[u64], _td_errs: &[f32]) {}

    fn len(&self) -> usize {
        self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn returns_none_until_enough_ids_are_live() {
        let mut scheme = UniformSampleScheme::new(42);
        scheme.add(2);
        scheme.add(3);
        assert!(scheme.sample(4).is_none());
    }

    #[test]
    fn draws_distinct_live_ids_without_weights() {
        let mut scheme = UniformSampleScheme::new(42);
        for id in [2u64, 3, 4, 5].iter() {
            scheme.add(*id);
        }

        let batch = scheme.sample(4).unwrap();
        assert!(batch.weights.is_none());
        let drawn: HashSet<u64> = batch.ids.iter().cloned().collect();
        assert_eq!(drawn, [2u64, 3, 4, 5].iter().cloned().collect());
    }

    #[test]
    fn remove_swaps_last_id_into_place() {
        let mut scheme = UniformSampleScheme::new(0);
        for id in 0..8 {
            scheme.add(id);
        }
        scheme.remove(3);
        scheme.remove(100); // unknown, no-op
        assert_eq!(scheme.len(), 7);

        for _ in 0..50 {
            let batch = scheme.sample(7).unwrap();
            assert!(!batch.ids.contains(&3));
        }
    }
}
