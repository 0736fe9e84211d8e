//! Blocking batch channel between the data manager and the learner.
use crate::error::RiffleError;
use anyhow::Result;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Creates a channel holding one assembled batch.
///
/// The data-manager side checks [`can_store`](BatchStore::can_store) before
/// sampling so batch assembly is skipped while the learner still holds the
/// previous batch; [`store`](BatchStore::store) blocks until drained rather
/// than dropping, so a learner stall never masks data loss.
pub fn batch_store<T>() -> (BatchStore<T>, BatchReceiver<T>) {
    let (s, r) = bounded(1);
    (BatchStore { s }, BatchReceiver { r })
}

/// Producer end of a batch channel.
pub struct BatchStore<T> {
    s: Sender<T>,
}

impl<T> BatchStore<T> {
    /// Whether the channel can accept a batch without blocking.
    pub fn can_store(&self) -> bool {
        !self.s.is_full()
    }

    /// Publishes a batch, blocking until the previous one is drained.
    pub fn store(&self, batch: T) -> Result<()> {
        match self.s.send(batch) {
            Ok(()) => Ok(()),
            Err(_e) => Err(RiffleError::BatchConsumerDisconnected)?,
        }
    }
}

/// Consumer end of a batch channel.
pub struct BatchReceiver<T> {
    r: Receiver<T>,
}

impl<T> BatchReceiver<T> {
    /// Returns the pending batch, or `None` if none is ready.
    ///
    /// Non-blocking: the learner's outer loop must tolerate `None`
    /// indefinitely during warm-up.
    pub fn get(&self) -> Option<T> {
        self.r.try_recv().ok()
    }
}
