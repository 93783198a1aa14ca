//! Background sweeper for expired entries.
//!
//! The janitor is a plain thread parked on an mpsc stop channel:
//! `recv_timeout(interval)` doubles as both the tick timer and the
//! cancellation wait, so a cancel wakes the thread immediately instead of
//! after a full period. Each tick runs the sweep the cache hands it; the
//! sweep reports `false` once the cache has been dropped, which also ends
//! the thread.
//!
//! Lifecycle, in order of precedence:
//! 1. [`Canceller::cancel`] — stops before the next tick.
//! 2. Dropping the last cache handle — the janitor guard sends stop and
//!    joins on drop.
//! 3. The weak core handle failing to upgrade at a tick, as a backstop.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Cancellation handle for a running janitor.
///
/// Clonable and idempotent; cancelling an already-stopped janitor is a
/// no-op.
#[derive(Debug, Clone)]
pub struct Canceller {
    stop: Sender<()>,
}

impl Canceller {
    /// Stops the janitor before its next tick.
    ///
    /// The in-flight sweep, if any, runs to completion.
    pub fn cancel(&self) {
        let _ = self.stop.send(());
    }
}

/// Owning guard for the sweeper thread.
pub(crate) struct Janitor {
    canceller: Canceller,
    thread: Option<JoinHandle<()>>,
}

impl Janitor {
    /// Spawns the sweeper, invoking `tick` every `interval`.
    ///
    /// `tick` returns `false` when its cache is gone and the thread should
    /// exit on its own.
    pub(crate) fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("memocache-janitor".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        if !tick() {
                            break;
                        }
                    }
                }
            })
            .expect("failed to spawn janitor thread");
        Self {
            canceller: Canceller { stop: stop_tx },
            thread: Some(thread),
        }
    }

    /// Returns a cancellation handle sharing this janitor's stop channel.
    pub(crate) fn canceller(&self) -> Canceller {
        self.canceller.clone()
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.canceller.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
