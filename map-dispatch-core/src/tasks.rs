//! Keyed async tasks
//!
//! A task is a future that resolves to an action; the action is sent back
//! into the store's queue. Keys name a slot: spawning into an occupied slot
//! aborts the task already there, so one key delivers at most one result
//! per spawn that was not superseded.
//!
//! ```ignore
//! tasks.spawn("weather", async move {
//!     match source.fetch(&regions).await {
//!         Ok(readings) => Action::DidLoad(readings),
//!         Err(e) => Action::DidFail(e.to_string()),
//!     }
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Name of a task slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(&'static str);

impl TaskKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(name: &'static str) -> Self {
        Self(name)
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Running tasks by key. Dropping the manager aborts all of them.
pub struct TaskManager<A> {
    slots: HashMap<TaskKey, AbortHandle>,
    results: mpsc::UnboundedSender<A>,
}

impl<A: Action> TaskManager<A> {
    /// Results of spawned tasks are sent to `results`.
    pub fn new(results: mpsc::UnboundedSender<A>) -> Self {
        Self {
            slots: HashMap::new(),
            results,
        }
    }

    /// Spawn `future` under `key`, aborting whatever ran there before.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F)
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(key);

        let results = self.results.clone();
        let handle = tokio::spawn(async move {
            // A closed queue means the store is gone; nothing to report to.
            let _ = results.send(future.await);
        });

        tracing::trace!(task = %key, "task spawned");
        self.slots.insert(key, handle.abort_handle());
    }

    /// Abort the task under `key`. Returns whether one was still running.
    pub fn cancel(&mut self, key: impl Into<TaskKey>) -> bool {
        let key = key.into();
        let Some(handle) = self.slots.remove(&key) else {
            return false;
        };

        let running = !handle.is_finished();
        if running {
            tracing::debug!(task = %key, "task superseded");
        }
        handle.abort();
        running
    }

    pub fn is_running(&self, key: impl Into<TaskKey>) -> bool {
        self.slots
            .get(&key.into())
            .is_some_and(|handle| !handle.is_finished())
    }

    /// True when no task is left running.
    pub fn is_idle(&self) -> bool {
        self.slots.values().all(AbortHandle::is_finished)
    }

    /// Forget slots whose task completed. A completed task already sent its
    /// action.
    pub(crate) fn prune_finished(&mut self) {
        self.slots.retain(|_, handle| !handle.is_finished());
    }
}

impl<A> fmt::Debug for TaskManager<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.slots.keys()).finish()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for handle in self.slots.values() {
            handle.abort();
        }
    }
}
