//! Errors in the asynchronous replay glue.
use thiserror::Error;

/// Errors in the asynchronous replay glue.
#[derive(Error, Debug)]
pub enum AsyncReplayError {
    /// Joining a worker or actor thread failed because it panicked.
    #[error("Thread panicked")]
    ThreadPanicked,
}
