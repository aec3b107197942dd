//! State container with reducer pattern
//!
//! A [`Store`] owns its state and changes it only by running the reducer on
//! a dispatched action. Middleware observes every dispatch from the outside.
//!
//! The reducer's return type decides what the caller gets back: plain
//! stores return `bool` (whether observers must be notified), effect stores
//! return a [`DispatchResult`](crate::DispatchResult) that also lists the
//! side effects to run.
//!
//! ```ignore
//! fn reducer(state: &mut Visibility, action: VisibilityAction) -> bool {
//!     match action {
//!         VisibilityAction::Show(codes) => {
//!             state.visible = codes;
//!             true
//!         }
//!     }
//! }
//!
//! let mut store = Store::new(Visibility::default(), reducer, ActionLoggerMiddleware::default());
//! store.dispatch(VisibilityAction::Show(vec!["11000".into()]));
//! ```

use std::marker::PhantomData;

use crate::Action;

/// A reducer: applies an action to state and reports the outcome.
pub type Reducer<S, A, R = bool> = fn(&mut S, A) -> R;

/// What a reducer returns. Middleware only sees whether state changed.
pub trait ReducerOutcome {
    fn changed(&self) -> bool;
}

impl ReducerOutcome for bool {
    fn changed(&self) -> bool {
        *self
    }
}

/// Observes actions around the reducer, e.g. for logging.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

pub struct Store<S, A, M, R = bool> {
    state: S,
    reducer: Reducer<S, A, R>,
    middleware: M,
    _action: PhantomData<fn(A)>,
}

impl<S, A, M, R> Store<S, A, M, R>
where
    A: Action,
    M: Middleware<A>,
    R: ReducerOutcome,
{
    pub fn new(state: S, reducer: Reducer<S, A, R>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _action: PhantomData,
        }
    }

    /// Run the action through middleware and reducer.
    pub fn dispatch(&mut self, action: A) -> R {
        self.middleware.before(&action);
        let outcome = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, outcome.changed());
        outcome
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
