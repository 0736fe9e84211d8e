#![warn(missing_docs)]
//! Threading glue for the replay subsystem.
//!
//! Wires the pieces of `riffle-core` into the actor / replay-worker /
//! learner topology:
//!
//! * [`Actor`] threads generate transitions and push them through per-actor
//!   entry pipes.
//! * One [`ReplayWorker`] thread owns the
//!   [`DataManager`](riffle_core::store::DataManager), drains the pipes,
//!   samples batches into a batch store and applies [`PriorityUpdate`]
//!   messages coming back from the learner.
//! * The learner runs on the caller's thread, polling the batch store and
//!   sending priority feedback over a channel.
//!
//! All loops check a shared stop flag once per iteration for orderly
//! shutdown.
mod actor;
mod error;
mod messages;
mod replay_worker;
mod util;

pub use actor::Actor;
pub use error::AsyncReplayError;
pub use messages::PriorityUpdate;
pub use replay_worker::ReplayWorker;
pub use util::join_threads;
