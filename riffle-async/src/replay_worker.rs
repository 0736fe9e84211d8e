//! The thread that owns the replay store.
use crate::PriorityUpdate;
use crossbeam_channel::Receiver;
use log::info;
use riffle_core::{
    store::{DataManager, TransitionBatch},
    transport::BatchStore,
    BatchData, RemovalScheme, SampleScheme,
};
use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

/// Runs the data manager: drains inbound transitions, applies priority
/// feedback and publishes assembled batches.
///
/// This is the single writer of the transition table and the segment trees.
/// Each loop iteration checks the shared stop flag once; inserts and
/// evictions complete within an iteration, so no partial state is ever
/// observable through the published batches.
pub struct ReplayWorker<O, A, S, R>
where
    O: BatchData,
    A: BatchData,
    S: SampleScheme,
    R: RemovalScheme,
{
    manager: DataManager<O, A, S, R>,
    batch_store: BatchStore<TransitionBatch<O, A>>,
    priority_updates: Receiver<PriorityUpdate>,
    batch_size: usize,
    stop: Arc<Mutex<bool>>,
}

impl<O, A, S, R> ReplayWorker<O, A, S, R>
where
    O: BatchData,
    A: BatchData,
    S: SampleScheme,
    R: RemovalScheme,
{
    /// Creates a worker around an already wired [`DataManager`].
    pub fn new(
        manager: DataManager<O, A, S, R>,
        batch_store: BatchStore<TransitionBatch<O, A>>,
        priority_updates: Receiver<PriorityUpdate>,
        batch_size: usize,
        stop: Arc<Mutex<bool>>,
    ) -> Self {
        Self {
            manager,
            batch_store,
            priority_updates,
            batch_size,
            stop,
        }
    }

    /// Runs the worker loop on the current thread until the stop flag is
    /// set or the batch consumer hangs up.
    pub fn run(mut self) {
        info!("replay worker started");
        loop {
            if *self.stop.lock().unwrap() {
                break;
            }

            while let Ok(msg) = self.priority_updates.try_recv() {
                self.manager.update_priorities(&msg.ids, &msg.td_errs);
            }

            self.manager.receive_new_entries();

            if self.batch_store.can_store() {
                if let Some(batch) = self.manager.sample_data(self.batch_size) {
                    if self.batch_store.store(batch).is_err() {
                        info!("batch consumer disconnected, replay worker exits");
                        break;
                    }
                    continue;
                }
            }

            std::thread::yield_now();
        }
        info!("replay worker stopped");
    }

    /// Runs the worker loop on a new thread.
    pub fn spawn(self) -> JoinHandle<()>
    where
        O: Send + 'static,
        A: Send + 'static,
        S: Send + 'static,
        R: Send + 'static,
    {
        std::thread::spawn(move || self.run())
    }
}
