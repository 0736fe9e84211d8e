//! Eviction and sampling policies over logical ids.
//!
//! A [`RemovalScheme`](crate::RemovalScheme) decides which stored id to evict
//! next; a [`SampleScheme`](crate::SampleScheme) draws the ids that make up a
//! training batch. Both operate purely on ids and are kept in lockstep with
//! the transition table by [`DataManager`](crate::store::DataManager).
mod config;
mod density;
mod fifo;
mod uniform;

pub use config::DensityConfig;
pub use density::{BetaSchedule, DensitySampleScheme};
pub use fifo::FifoRemoval;
pub use uniform::UniformSampleScheme;
