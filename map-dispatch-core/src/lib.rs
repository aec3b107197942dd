//! Core traits and types for map-dispatch
//!
//! Foundational pieces for client-side state containers that follow a
//! Redux/Elm-inspired architecture:
//!
//! - **Action**: describes a state change
//! - **Store**: owns state, mutated only through a reducer
//! - **EffectStore**: reducer also declares side effects
//! - **EffectRuntime**: executes effects as keyed async tasks (feature `tasks`)
//!
//! # Async Handler Pattern
//!
//! Work that waits on I/O uses a two-phase action pattern:
//!
//! 1. **Intent actions** trigger async work (e.g. `WeatherFetch`)
//! 2. **Result actions** carry the outcome back (e.g. `WeatherDidLoad`, `WeatherDidFail`)
//!
//! ```ignore
//! fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
//!     match effect {
//!         Effect::Fetch { request, regions } => {
//!             ctx.tasks().spawn("weather", async move {
//!                 match fetch(&regions).await {
//!                     Ok(readings) => Action::WeatherDidLoad { request, readings },
//!                     Err(e) => Action::WeatherDidFail { request, failure: e.into() },
//!                 }
//!             });
//!         }
//!     }
//! }
//! ```
//!
//! The `Did*` naming convention marks result actions. With
//! `#[action(infer_categories)]` they share the category of their intent
//! (`WeatherFetch` and `WeatherDidLoad` are both `"weather"`).

pub mod action;
pub mod effect;
pub mod logger;
#[cfg(feature = "tasks")]
pub mod runtime;
pub mod store;
#[cfg(feature = "tasks")]
pub mod tasks;
#[cfg(feature = "tasks")]
pub mod testing;

// Core trait exports
pub use action::{Action, ActionCategory, ActionSummary};

// Store exports
pub use store::{Middleware, Reducer, ReducerOutcome, Store};

// Effect exports
pub use effect::{DispatchResult, EffectStore};

// Logging exports
pub use logger::{ActionLoggerConfig, ActionLoggerMiddleware};

// Runtime exports (requires "tasks" feature)
#[cfg(feature = "tasks")]
pub use runtime::{EffectContext, EffectRuntime};
#[cfg(feature = "tasks")]
pub use tasks::{TaskKey, TaskManager};

// Testing exports
#[cfg(feature = "tasks")]
pub use testing::TestHarness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::effect::{DispatchResult, EffectStore};
    pub use crate::logger::{ActionLoggerConfig, ActionLoggerMiddleware};
    #[cfg(feature = "tasks")]
    pub use crate::runtime::{EffectContext, EffectRuntime};
    pub use crate::store::{Middleware, Reducer, Store};
    #[cfg(feature = "tasks")]
    pub use crate::tasks::{TaskKey, TaskManager};
}
