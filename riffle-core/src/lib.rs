#![warn(missing_docs)]
//! Core machinery of an experience-replay subsystem for reinforcement learning.
//!
//! Actor processes generate transition records at high rate; a single learner
//! consumes fixed-size batches. This crate provides the pieces that make that
//! hand-off efficient and priority-aware:
//!
//! * [`segment_tree`] — flat-array sum tree with inverse-CDF prefix descent,
//!   the primitive behind O(log n) weighted sampling.
//! * [`selectors`] — eviction and sampling policies: [`FifoRemoval`],
//!   [`UniformSampleScheme`] and the prioritized [`DensitySampleScheme`].
//! * [`store`] — the fixed-capacity transition table ([`DataStore`]) and the
//!   single-writer coordinator ([`DataManager`]).
//! * [`transport`] — bounded single-producer/single-consumer pipes moving
//!   transitions and assembled batches between threads.
//!
//! Storage and transport are generic over the transition schema through the
//! [`BatchData`] trait; an [`ndarray`]-backed implementation is provided in
//! [`array`].
//!
//! [`FifoRemoval`]: selectors::FifoRemoval
//! [`UniformSampleScheme`]: selectors::UniformSampleScheme
//! [`DensitySampleScheme`]: selectors::DensitySampleScheme
//! [`DataStore`]: store::DataStore
//! [`DataManager`]: store::DataManager
pub mod array;
pub mod error;
pub mod segment_tree;
pub mod selectors;
pub mod store;
pub mod transport;

mod base;
pub use base::{
    Adder, BatchData, GenerateCallback, OneStepAdder, RemovalScheme, SampleScheme, SampledIds,
    Transition,
};
