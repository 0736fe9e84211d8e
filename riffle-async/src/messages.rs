//! Messages crossing the learner / replay-worker boundary.
use serde::{Deserialize, Serialize};

/// Priority feedback computed by the learner for previously sampled ids.
///
/// Priorities are never written by the learner directly; the message is
/// applied by the replay worker on its own thread so the transition table
/// and the segment trees keep a single writer.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PriorityUpdate {
    /// Logical ids taken from the batch that produced the errors.
    pub ids: Vec<u64>,

    /// TD errors, one per id.
    pub td_errs: Vec<f32>,
}
