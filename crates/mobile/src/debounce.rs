//! Trailing-edge debouncing keyed by purpose.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// One pending timer per key. Scheduling under a key replaces the previous
/// timer for that key; other keys are unaffected.
///
/// Cancelling only stops a timer that has not fired. Once it fires, the task
/// is spawned on its own and runs to completion.
pub struct Debouncer<K> {
    runtime: Handle,
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Debouncer<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn schedule<F>(&self, key: K, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = self.runtime.clone();
        let deadline = Instant::now() + delay;
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            runtime.spawn(task);
        });

        if let Some(previous) = self.pending.lock().insert(key, timer) {
            if !previous.is_finished() {
                tracing::trace!(?key, "debounce restarted");
            }
            previous.abort();
        }
    }

    /// Returns whether a timer was still waiting.
    pub fn cancel(&self, key: K) -> bool {
        match self.pending.lock().remove(&key) {
            Some(timer) => {
                let waiting = !timer.is_finished();
                timer.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, timer) in self.pending.lock().drain() {
            timer.abort();
        }
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending
            .lock()
            .get(&key)
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, timer) in self.pending.get_mut().drain() {
            timer.abort();
        }
    }
}
