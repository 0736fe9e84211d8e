//! Bounded single-producer/single-consumer transport.
//!
//! Two channel flavors move records between threads without per-message
//! framing, the record schema being fixed by the channel's type parameter at
//! construction:
//!
//! * [`entry_pipe`] carries fresh transitions from one producer to the data
//!   manager. Policy: drop-and-overwrite, so a stalled manager never blocks
//!   an actor and `get` always observes the latest record.
//! * [`batch_store`] carries assembled batches to the learner. Policy:
//!   block-until-drained, so a slow learner applies backpressure instead of
//!   silently losing batches.
mod batch_store;
mod entry_pipe;

pub use batch_store::{batch_store, BatchReceiver, BatchStore};
pub use entry_pipe::{entry_pipe, EntryReceiver, EntrySender};
