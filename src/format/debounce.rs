//! Trailing-edge debouncing on the tokio runtime

use std::time::Duration;
use tokio::task::JoinHandle;

/// Coalesces bursts of calls so only the last one runs
///
/// Each [`call`](Debouncer::call) cancels the previously scheduled action and
/// schedules the new one `wait` from now. Must be used inside a tokio runtime.
pub struct Debouncer {
    wait: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Schedule `action`, replacing any action still waiting
    pub fn call<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action();
        }));
    }

    /// Drop the pending action, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an action is scheduled and has not run yet
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
