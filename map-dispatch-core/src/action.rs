//! Action traits for type-safe state mutations

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for actions that can be dispatched to a store
///
/// Actions describe an intent to change state. They must be:
/// - Clone: middleware sees the action before the reducer consumes it
/// - Debug: for logging
/// - Send + 'static: async tasks send result actions back across threads
///
/// Use `#[derive(Action)]` from `map-dispatch-macros` to implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions that belong to a named category (usually the store they target)
///
/// Generated by `#[derive(Action)]` together with `#[action(infer_categories)]`.
pub trait ActionCategory: Action {
    /// Enum with one variant per discovered category
    type Category: Copy + Eq + Hash + Debug;

    /// Category name in snake_case, `None` when uncategorized
    fn category(&self) -> Option<&'static str>;

    /// Category as an enum value
    fn category_enum(&self) -> Self::Category;
}

/// Short, human-readable description of an action for log records.
///
/// The default is the `Debug` output. Override it for actions that carry
/// large payloads, such as region lists or response batches.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
