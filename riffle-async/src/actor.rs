//! Transition-producing worker loop.
use riffle_core::transport::EntrySender;
use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
};

/// Drives a transition producer until the stop flag is set.
///
/// The producer is a closure returning the next record, typically the tail
/// end of an environment/adder pair; returning `None` ends the loop early.
/// Records go out through an overwriting entry pipe, so a slow data manager
/// never blocks the actor.
pub struct Actor<F, T>
where
    F: FnMut() -> Option<T>,
{
    id: usize,
    generate: F,
    sender: EntrySender<T>,
    stop: Arc<Mutex<bool>>,
}

impl<F, T> Actor<F, T>
where
    F: FnMut() -> Option<T>,
{
    /// Creates an actor pushing into `sender`.
    pub fn new(id: usize, generate: F, sender: EntrySender<T>, stop: Arc<Mutex<bool>>) -> Self {
        Self {
            id,
            generate,
            sender,
            stop,
        }
    }

    /// Runs the generation loop on the current thread.
    pub fn run(mut self) {
        log::info!("actor {} started", self.id);
        loop {
            if *self.stop.lock().unwrap() {
                break;
            }
            match (self.generate)() {
                Some(record) => self.sender.store(record),
                None => break,
            }
            std::thread::yield_now();
        }
        log::info!("actor {} stopped", self.id);
    }

    /// Runs the generation loop on a new thread.
    pub fn spawn(self) -> JoinHandle<()>
    where
        F: Send + 'static,
        T: Send + 'static,
    {
        std::thread::spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riffle_core::transport::entry_pipe;

    #[test]
    fn stops_when_generator_is_exhausted() {
        let (tx, rx) = entry_pipe();
        let stop = Arc::new(Mutex::new(false));
        let mut left = 3u32;
        let actor = Actor::new(
            0,
            move || {
                if left == 0 {
                    None
                } else {
                    left -= 1;
                    Some(left)
                }
            },
            tx,
            stop,
        );
        actor.run();

        // Overwrite policy keeps only the newest record.
        assert_eq!(rx.get(), Some(0));
        assert_eq!(rx.get(), None);
    }

    #[test]
    fn stops_on_the_shared_flag() {
        let (tx, _rx) = entry_pipe();
        let stop = Arc::new(Mutex::new(false));
        let handle = Actor::new(1, || Some(0u32), tx, stop.clone()).spawn();

        *stop.lock().unwrap() = true;
        handle.join().unwrap();
    }
}
