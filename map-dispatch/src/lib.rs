//! map-dispatch: client-side state containers for Rust
//!
//! Like Redux/Elm: state lives in stores, every mutation is a dispatched
//! action, and I/O is declared by reducers as effects that run as keyed
//! async tasks.
//!
//! # Example
//! ```ignore
//! use map_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(infer_categories)]
//! enum AppAction {
//!     MapSetVisibleRegions(Vec<Region>),
//!     MapClearHoveredRegion,
//! }
//!
//! assert_eq!(AppAction::MapClearHoveredRegion.category(), Some("map"));
//! ```

// Re-export everything from core
pub use map_dispatch_core::*;

// Re-export derive macros
pub use map_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use map_dispatch_core::{Action, ActionCategory, ActionSummary};

    // Stores
    pub use map_dispatch_core::{
        DispatchResult, EffectStore, Middleware, Reducer, Store,
    };

    // Logging
    pub use map_dispatch_core::{ActionLoggerConfig, ActionLoggerMiddleware};

    // Runtime
    #[cfg(feature = "tasks")]
    pub use map_dispatch_core::{EffectContext, EffectRuntime, TaskKey, TaskManager};

    // Derive macros
    pub use map_dispatch_macros::Action;
}
