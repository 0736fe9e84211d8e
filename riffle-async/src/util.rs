//! Thread handling utilities.
use crate::AsyncReplayError;
use anyhow::Result;
use std::thread::JoinHandle;

/// Joins a set of actor or worker threads, surfacing a panic in any of
/// them as an error.
pub fn join_threads(handles: Vec<JoinHandle<()>>) -> Result<()> {
    for handle in handles {
        handle.join().map_err(|_| AsyncReplayError::ThreadPanicked)?;
    }
    Ok(())
}
