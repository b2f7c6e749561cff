//! Background autosave.
//!
//! Write-through saves already keep storage current; this thread saves
//! again on a fixed interval as redundancy. The store is shared behind
//! a mutex, so an autosave never interleaves with a mutation.

use crate::queue::QueueStore;
use parking_lot::Mutex;
use std::sync::{
    mpsc::{self, RecvTimeoutError},
    Arc,
};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

pub struct AutosaveHandle {
    stop_tx: Option<mpsc::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

/// Start saving `store` every `interval` until the handle is stopped or dropped.
pub fn spawn(store: Arc<Mutex<QueueStore>>, interval: Duration) -> AutosaveHandle {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let join = std::thread::spawn(move || loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                match store.lock().flush() {
                    Ok(()) => log::debug!("autosave: saved"),
                    Err(e) => log::warn!("autosave failed: {e}"),
                }
            }
            // Stop requested or handle dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    });
    AutosaveHandle {
        stop_tx: Some(stop_tx),
        join: Some(join),
    }
}

impl AutosaveHandle {
    /// Stop the thread and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                log::error!("autosave thread panicked");
            }
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
