//! Test utilities for effect handlers
//!
//! [`TestHarness`] owns a [`TaskManager`] wired to a channel the test can
//! read, so a handler can be driven without a store.
//!
//! ```ignore
//! let mut harness = TestHarness::<WeatherAction>::new();
//! handle_effect(effect, &mut harness.context(), &source);
//!
//! let action = harness.recv_emitted(Duration::from_secs(1)).await;
//! assert!(matches!(action, Some(WeatherAction::WeatherDidLoad { .. })));
//! ```

use std::time::Duration;

use tokio::sync::mpsc;

use crate::runtime::EffectContext;
use crate::tasks::TaskManager;
use crate::Action;

pub struct TestHarness<A> {
    tasks: TaskManager<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A: Action> TestHarness<A> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tasks: TaskManager::new(tx),
            rx,
        }
    }

    /// Context to hand to an effect handler.
    pub fn context(&mut self) -> EffectContext<'_, A> {
        EffectContext::new(&mut self.tasks)
    }

    pub fn tasks(&self) -> &TaskManager<A> {
        &self.tasks
    }

    /// Wait for the next action sent by a spawned task.
    ///
    /// Returns `None` when nothing arrives within `timeout`.
    pub async fn recv_emitted(&mut self, timeout: Duration) -> Option<A> {
        tokio::time::timeout(timeout, self.rx.recv())
            .await
            .ok()
            .flatten()
    }
}

impl<A: Action> Default for TestHarness<A> {
    fn default() -> Self {
        Self::new()
    }
}
