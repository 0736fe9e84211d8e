//! Overwriting transition pipe between one producer and the data manager.
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;

/// Creates a pipe holding the single most recent record.
///
/// The producer keeps the [`EntrySender`]; the data manager polls the
/// [`EntryReceiver`]. Within the pipe, records are delivered in generation
/// order; a record the consumer has not drained yet is discarded when the
/// next one arrives.
pub fn entry_pipe<T>() -> (EntrySender<T>, EntryReceiver<T>) {
    let (s, r) = bounded(1);
    (
        EntrySender { s, r: r.clone() },
        EntryReceiver { r },
    )
}

/// Producer end of an entry pipe.
pub struct EntrySender<T> {
    s: Sender<T>,
    // Kept to discard the stale record when publishing over a full pipe.
    r: Receiver<T>,
}

impl<T> EntrySender<T> {
    /// Publishes one record, overwriting an undrained predecessor.
    ///
    /// Never blocks. If the consumer end hung up the record is dropped,
    /// which only happens during shutdown.
    pub fn store(&self, record: T) {
        let mut record = record;
        loop {
            match self.s.try_send(record) {
                Ok(()) => return,
                Err(TrySendError::Full(rec)) => {
                    let _ = self.r.try_recv();
                    record = rec;
                }
                Err(TrySendError::Disconnected(_)) => {
                    trace!("entry pipe consumer disconnected; dropping record");
                    return;
                }
            }
        }
    }
}

/// Consumer end of an entry pipe.
pub struct EntryReceiver<T> {
    r: Receiver<T>,
}

impl<T> EntryReceiver<T> {
    /// Returns the latest published record, or `None` if none is pending.
    pub fn get(&self) -> Option<T> {
        self.r.try_recv().ok()
    }
}
