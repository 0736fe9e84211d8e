//! Priority-weighted sampling backed by segment trees.
mod beta;

use crate::{
    segment_tree::{min_tree, MinTree, SumTree},
    SampleScheme, SampledIds,
};
use super::DensityConfig;
pub use beta::BetaSchedule;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;

/// Samples ids proportionally to their priority.
///
/// Live ids occupy the contiguous slot range `[0, num_idxs)` of a sum tree
/// and a min tree; removal swaps the last live slot into the freed position
/// so segment-tree indexing never leaves that range. New ids are seeded with
/// the running maximum priority so they get sampled at least once before
/// their real priority is known.
///
/// Sampling without replacement is done by rejection: each drawn slot's
/// sum-tree leaf is zeroed for the remainder of the call so it cannot be
/// drawn twice, and only the shortfall is re-drawn after collisions. The
/// zeroed leaves are restored to their real priorities before `sample`
/// returns, so a call leaves the distribution exactly as it found it.
pub struct DensitySampleScheme {
    it_sum: SumTree,
    it_min: MinTree,
    max_size: usize,
    /// Slot index to logical id, dense over `[0, num_idxs)`.
    data_idxs: Vec<u64>,
    /// Logical id to slot index; bijective with `data_idxs` over live ids.
    sample_idxs: HashMap<u64, usize>,
    num_idxs: usize,
    learn_step: usize,
    alpha: f32,
    epsilon: f32,
    beta: BetaSchedule,
    max_priority: f32,
    rng: StdRng,
}

impl DensitySampleScheme {
    /// Creates a scheme from its configuration.
    pub fn build(config: &DensityConfig) -> Self {
        Self {
            it_sum: SumTree::new(config.capacity),
            it_min: min_tree(crate::segment_tree::tree_capacity(config.capacity)),
            max_size: config.capacity,
            data_idxs: vec![0; config.capacity],
            sample_idxs: HashMap::new(),
            num_idxs: 0,
            learn_step: 0,
            alpha: config.alpha,
            epsilon: config.epsilon,
            beta: config.beta.clone(),
            max_priority: config.epsilon,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Number of `sample` calls made so far, which drives the beta schedule.
    pub fn learn_step(&self) -> usize {
        self.learn_step
    }

    fn draw_round(&mut self, need: usize, slots: &mut Vec<usize>, saved: &mut Vec<f32>) -> bool {
        let remaining = self.it_sum.total();
        if remaining <= 0.0 {
            return false;
        }

        let masses: Vec<f32> = (0..need)
            .map(|_| self.rng.gen::<f32>() * remaining)
            .collect();
        for idx in self.it_sum.find_prefix_indices(&masses) {
            let p = self.it_sum.get(idx);
            if p == 0.0 {
                // collision within this round
                continue;
            }
            self.it_sum.update(idx, 0.0);
            slots.push(idx);
            saved.push(p);
        }
        true
    }
}

impl SampleScheme for DensitySampleScheme {
    fn add(&mut self, id: u64) {
        assert!(
            self.num_idxs < self.max_size,
            "added element makes buffer greater than max size, make sure to remove element first"
        );
        let idx = self.num_idxs;
        self.data_idxs[idx] = id;
        self.sample_idxs.insert(id, idx);
        self.num_idxs += 1;

        self.it_sum.update(idx, self.max_priority);
        self.it_min.modify(idx, self.max_priority);
    }

    fn remove(&mut self, id: u64) {
        let idx = match self.sample_idxs.remove(&id) {
            Some(idx) => idx,
            None => return,
        };

        let last = self.num_idxs - 1;
        if idx != last {
            let last_id = self.data_idxs[last];
            self.it_sum.update(idx, self.it_sum.get(last));
            self.it_min.modify(idx, self.it_min.query(last, last + 1));
            self.data_idxs[idx] = last_id;
            self.sample_idxs.insert(last_id, idx);
        }

        // The freed slot must not affect aggregates.
        self.it_sum.update(last, 0.0);
        self.it_min.modify(last, f32::MAX);
        self.num_idxs = last;
    }

    fn sample(&mut self, batch_size: usize) -> Option<SampledIds> {
        if self.num_idxs < batch_size {
            return None;
        }

        let total = self.it_sum.total();
        if total <= 0.0 {
            return None;
        }
        let n = self.num_idxs as f32;
        let beta = self.beta.beta(self.learn_step);
        let p_min = self.it_min.query(0, self.num_idxs) / total;
        let max_weight = (p_min * n).powf(-beta);

        let mut slots: Vec<usize> = Vec::with_capacity(batch_size);
        let mut saved: Vec<f32> = Vec::with_capacity(batch_size);
        let mut exhausted = false;
        while slots.len() < batch_size {
            let need = batch_size - slots.len();
            if !self.draw_round(need, &mut slots, &mut saved) {
                exhausted = true;
                break;
            }
        }

        // Restore the real priorities; the temporary zeroing is visible only
        // within this call.
        for (&idx, &p) in slots.iter().zip(saved.iter()) {
            self.it_sum.update(idx, p);
        }

        // Can only happen with a zero epsilon floor and zero-priority slots.
        if exhausted {
            return None;
        }

        let weights = saved
            .iter()
            .map(|&p| ((p / total) * n).powf(-beta) / max_weight)
            .collect();
        let ids = slots.iter().map(|&idx| self.data_idxs[idx]).collect();
        self.learn_step += 1;

        Some(SampledIds {
            ids,
            weights: Some(weights),
        })
    }

    fn update_weights(&mut self, ids: &[u64], td_errs: &[f32]) {
        assert_eq!(
            ids.len(),
            td_errs.len(),
            "ids and td_errs must have the same length"
        );

        let mut new_max = 0.999 * self.max_priority;
        for (&id, &td_err) in ids.iter().zip(td_errs.iter()) {
            let p = self.epsilon + td_err.abs().powf(self.alpha);
            // Feedback may arrive after the id was evicted; skip it.
            let idx = match self.sample_idxs.get(&id) {
                Some(&idx) => idx,
                None => continue,
            };
            self.it_sum.update(idx, p);
            self.it_min.modify(idx, p);
            if p > new_max {
                new_max = p;
            }
        }
        self.max_priority = new_max;
    }

    fn len(&self) -> usize {
        self.num_idxs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleScheme;
    use std::collections::HashSet;

    fn scheme(capacity: usize, alpha: f32, epsilon: f32) -> DensitySampleScheme {
        DensitySampleScheme::build(
            &DensityConfig::default()
                .capacity(capacity)
                .alpha(alpha)
                .epsilon(epsilon)
                .beta(BetaSchedule::constant(1.0))
                .seed(42),
        )
    }

    #[test]
    fn returns_none_until_enough_ids_are_live() {
        let mut s = scheme(8, 1.0, 1e-7);
        s.add(0);
        s.add(1);
        assert!(s.sample(3).is_none());
    }

    #[test]
    #[should_panic]
    fn add_beyond_capacity_panics() {
        let mut s = scheme(2, 1.0, 1e-7);
        s.add(0);
        s.add(1);
        s.add(2);
    }

    #[test]
    fn sample_is_distinct_and_restores_priorities() {
        let mut s = scheme(8, 1.0, 0.0);
        for id in [2u64, 3, 4, 5].iter() {
            s.add(*id);
        }
        s.update_weights(&[2, 3, 4, 5], &[1.0, 1.0, 1.0, 100.0]);
        let total = s.it_sum.total();

        let batch = s.sample(4).unwrap();
        let drawn: HashSet<u64> = batch.ids.iter().cloned().collect();
        assert_eq!(drawn.len(), 4);
        assert_eq!(drawn, [2u64, 3, 4, 5].iter().cloned().collect());

        // The temporary zeroing must be fully reversible.
        assert!((s.it_sum.total() - total).abs() < 1e-4);
    }

    #[test]
    fn weights_are_bounded_and_min_priority_id_gets_one() {
        let mut s = scheme(8, 1.0, 0.0);
        for id in [2u64, 3, 4, 5].iter() {
            s.add(*id);
        }
        s.update_weights(&[2, 3, 4, 5], &[0.5, 1.0, 2.0, 100.0]);

        let batch = s.sample(4).unwrap();
        let weights = batch.weights.unwrap();
        for w in weights.iter() {
            assert!(*w > 0.0 && *w <= 1.0 + 1e-6);
        }

        // With beta = 1 the minimum-priority id is the normalizer.
        let ix = batch.ids.iter().position(|&id| id == 2).unwrap();
        assert!((weights[ix] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn high_priority_id_dominates_sampling() {
        let mut s = scheme(8, 1.0, 0.0);
        for id in [2u64, 3, 4, 5].iter() {
            s.add(*id);
        }
        s.update_weights(&[2, 3, 4, 5], &[1.0, 1.0, 1.0, 100.0]);

        let trials = 20000;
        let mut hits = 0;
        for _ in 0..trials {
            let batch = s.sample(1).unwrap();
            if batch.ids[0] == 5 {
                hits += 1;
            }
        }

        let freq = hits as f64 / trials as f64;
        let expected = 100.0 / 103.0;
        assert!((freq - expected).abs() < 0.02, "freq = {}", freq);
    }

    #[test]
    fn remove_swaps_last_slot_into_freed_position() {
        let mut s = scheme(8, 1.0, 0.0);
        for id in 10..14u64 {
            s.add(id);
        }
        s.update_weights(&[10, 11, 12, 13], &[1.0, 2.0, 3.0, 4.0]);
        s.remove(11);
        s.remove(99); // unknown, no-op
        assert_eq!(s.len(), 3);

        let batch = s.sample(3).unwrap();
        let drawn: HashSet<u64> = batch.ids.iter().cloned().collect();
        assert_eq!(drawn, [10u64, 12, 13].iter().cloned().collect());
        // The freed tail slot no longer contributes to the total.
        assert!((s.it_sum.total() - (1.0 + 3.0 + 4.0)).abs() < 1e-5);
    }

    #[test]
    fn priority_updates_are_monotone_and_decay_max() {
        let mut s = scheme(8, 1.0, 0.0);
        s.add(0);
        s.add(1);

        s.update_weights(&[0], &[1.0]);
        let p_before = s.it_sum.get(0);
        s.update_weights(&[0], &[2.0]);
        assert!(s.it_sum.get(0) > p_before);
        assert!((s.max_priority - 2.0).abs() < 1e-6);

        // A smaller update decays the running maximum slowly.
        s.update_weights(&[1], &[0.1]);
        assert!((s.max_priority - 0.999 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn new_ids_are_seeded_with_max_priority() {
        let mut s = scheme(8, 1.0, 0.0);
        s.add(0);
        s.update_weights(&[0], &[5.0]);
        s.add(1);
        assert!((s.it_sum.get(1) - 5.0).abs() < 1e-6);
    }
}
