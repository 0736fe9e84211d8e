//! Configuration of [`DensitySampleScheme`](super::DensitySampleScheme).
use super::BetaSchedule;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DensitySampleScheme`](super::DensitySampleScheme).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DensityConfig {
    /// Maximum number of ids the scheme can track at once. Rounded up to the
    /// next power of two for the segment-tree leaf count.
    pub capacity: usize,

    /// Priority exponent. `0.0` degenerates to uniform-by-count sampling,
    /// `1.0` is fully proportional.
    pub alpha: f32,

    /// Importance-weight exponent schedule.
    pub beta: BetaSchedule,

    /// Priority floor added to every updated priority so sampling
    /// probabilities stay strictly positive.
    pub epsilon: f32,

    /// Random seed for reproducible sampling.
    pub seed: u64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            capacity: 10000,
            alpha: 0.6,
            beta: BetaSchedule::default(),
            epsilon: 1e-7,
            seed: 42,
        }
    }
}

impl DensityConfig {
    /// Sets the capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the priority exponent.
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the beta schedule.
    pub fn beta(mut self, beta: BetaSchedule) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the priority floor.
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DensityConfig;
    use crate::selectors::BetaSchedule;

    #[test]
    fn yaml_round_trip() {
        let config = DensityConfig::default()
            .capacity(1024)
            .alpha(0.7)
            .beta(BetaSchedule::new(0.4, 1.0, 1000))
            .epsilon(1e-6)
            .seed(7);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let restored: DensityConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, restored);
    }
}
