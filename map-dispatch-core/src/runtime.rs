//! Runtime for effect stores.
//!
//! Dispatches actions into an [`EffectStore`] and hands the declared
//! effects to a caller-supplied handler. Handlers start async work through
//! [`EffectContext::tasks`]; each task resolves to an action that lands in
//! the runtime's queue, so results still go through the reducer.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::effect::EffectStore;
use crate::store::Middleware;
use crate::tasks::TaskManager;
use crate::Action;

/// How long `settle` waits for a result before checking the tasks again.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// What an effect handler may touch.
pub struct EffectContext<'a, A> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Wrap a task manager, e.g. to drive a handler in tests.
    pub fn new(tasks: &'a mut TaskManager<A>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

pub struct EffectRuntime<S, A, E, M> {
    store: EffectStore<S, A, E, M>,
    queue: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
}

impl<S, A, E, M> EffectRuntime<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn new(store: EffectStore<S, A, E, M>) -> Self {
        let (results, queue) = mpsc::unbounded_channel();
        Self {
            store,
            queue,
            tasks: TaskManager::new(results),
        }
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn store(&self) -> &EffectStore<S, A, E, M> {
        &self.store
    }

    /// Dispatch right away and run the resulting effects.
    ///
    /// Returns whether the state changed.
    pub fn dispatch<F>(&mut self, action: A, mut handle_effect: F) -> bool
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        self.apply(action, &mut handle_effect)
    }

    /// Dispatch task results that already arrived. Never waits.
    ///
    /// Returns the number of actions dispatched.
    pub fn process_pending<F>(&mut self, mut handle_effect: F) -> usize
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let mut dispatched = 0;
        while let Ok(action) = self.queue.try_recv() {
            self.apply(action, &mut handle_effect);
            dispatched += 1;
        }
        dispatched
    }

    /// Dispatch task results until no task is running and none are queued.
    ///
    /// No timeout applies: a task that never resolves keeps this waiting.
    /// Returns whether any dispatched result changed the state.
    pub async fn settle<F>(&mut self, mut handle_effect: F) -> bool
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let mut changed = false;

        loop {
            let action = match self.queue.try_recv() {
                Ok(action) => action,
                // A task sends its result right before it finishes.
                Err(_) if self.tasks.is_idle() => match self.queue.try_recv() {
                    Ok(action) => action,
                    Err(_) => break,
                },
                Err(_) => match tokio::time::timeout(IDLE_POLL, self.queue.recv()).await {
                    Ok(Some(action)) => action,
                    _ => continue,
                },
            };
            changed |= self.apply(action, &mut handle_effect);
        }

        self.tasks.prune_finished();
        changed
    }

    fn apply<F>(&mut self, action: A, handle_effect: &mut F) -> bool
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        let mut ctx = EffectContext::new(&mut self.tasks);
        for effect in result.effects {
            handle_effect(effect, &mut ctx);
        }
        result.changed
    }
}
