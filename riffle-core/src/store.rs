//! Fixed-capacity transition table and its single-writer coordinator.
mod batch;
mod config;
mod data_store;
mod manager;

pub use batch::TransitionBatch;
pub use config::ReplayConfig;
pub use data_store::DataStore;
pub use manager::DataManager;
