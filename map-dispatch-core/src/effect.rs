//! Effect-based state management
//!
//! Reducers stay synchronous and free of I/O. When an action needs outside
//! work (an HTTP call, for instance), the reducer returns a declarative
//! effect next to its state change, and the runtime decides how to run it.
//!
//! ```ignore
//! fn reducer(state: &mut ReadingsState, action: ReadingsAction) -> DispatchResult<Effect> {
//!     match action {
//!         ReadingsAction::Fetch(regions) => {
//!             state.is_loading = true;
//!             DispatchResult::changed_with(Effect::Fetch { regions })
//!         }
//!         ReadingsAction::DidLoad(readings) => {
//!             state.is_loading = false;
//!             state.readings = readings;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

use crate::store::{ReducerOutcome, Store};

/// Outcome of an effect reducer: change flag plus effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    /// Run in order after the reducer returns
    pub effects: Vec<E>,
}

impl<E> DispatchResult<E> {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: Vec::new(),
        }
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn changed_with(effect: E) -> Self {
        Self::changed().with(effect)
    }

    /// Append an effect.
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

impl<E> ReducerOutcome for DispatchResult<E> {
    fn changed(&self) -> bool {
        self.changed
    }
}

/// A [`Store`] whose reducer declares effects.
///
/// Middleware sees the action and the change flag, never the effects.
pub type EffectStore<S, A, E, M> = Store<S, A, M, DispatchResult<E>>;
