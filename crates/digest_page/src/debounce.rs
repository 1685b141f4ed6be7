use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Runs a callback at most once per quiet period, with the arguments of the
/// most recent call.
pub struct Debouncer<T> {
    wait: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Restarts the quiet period; `args` replace any pending call.
    pub fn call(&self, args: T) {
        let callback = self.callback.clone();
        let wait = self.wait;
        let task = tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(args);
        });

        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}
