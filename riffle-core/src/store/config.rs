//! Configuration of the replay store.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DataStore`](super::DataStore) and the loops driving it.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayConfig {
    /// Maximum number of transitions held at once (`max_entries`).
    pub capacity: usize,

    /// Number of transitions per sampled batch.
    pub batch_size: usize,

    /// Random seed handed to the sampling scheme at wiring time.
    pub seed: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            capacity: 10000,
            batch_size: 32,
            seed: 42,
        }
    }
}

impl ReplayConfig {
    /// Sets the store capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
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
