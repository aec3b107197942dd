//! Action logging with glob-pattern filtering
//!
//! [`ActionLoggerMiddleware`] writes one `tracing` record per dispatched
//! action that passes an include/exclude filter.
//!
//! ```ignore
//! use map_dispatch_core::{ActionLoggerConfig, ActionLoggerMiddleware, Store};
//!
//! // Everything from the weather store except per-result noise
//! let config = ActionLoggerConfig::new(Some("Weather*"), Some("WeatherDid*"));
//! let store = Store::new(state, reducer, ActionLoggerMiddleware::new(config));
//! ```

use crate::action::ActionSummary;
use crate::store::Middleware;

/// Include/exclude filter over action names.
///
/// Patterns support `*` (any sequence) and `?` (any single character):
///
/// - `Map*` matches MapSetVisibleRegions, MapClearHoveredRegion, ...
/// - `*Did*` matches WeatherDidLoad, WeatherDidFail
/// - `WeatherFetch` matches only WeatherFetch
///
/// The default config logs every action.
#[derive(Debug, Clone, Default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching one of these patterns
    pub include_patterns: Vec<String>,
    /// Never log actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionLoggerConfig {
    /// Create a config from comma-separated pattern lists
    ///
    /// `None` for `include` logs everything; `None` for `exclude` drops
    /// nothing.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Middleware that emits a `tracing` record for each logged action.
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    /// Sequence number of the next logged action
    sequence: u64,
    /// Whether the action currently in flight passed the filter
    current_logged: bool,
}

impl Default for ActionLoggerMiddleware {
    fn default() -> Self {
        Self::new(ActionLoggerConfig::default())
    }
}

impl ActionLoggerMiddleware {
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            sequence: 0,
            current_logged: false,
        }
    }

    /// Number of actions that passed the filter so far.
    pub fn logged(&self) -> u64 {
        self.sequence
    }
}

impl<A: ActionSummary> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, action: &A) {
        let name = action.name();
        self.current_logged = self.config.should_log(name);
        if !self.current_logged {
            return;
        }

        tracing::debug!(
            seq = self.sequence,
            action = %name,
            summary = %action.summary(),
            "dispatching action"
        );
        self.sequence += 1;
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if !self.current_logged {
            return;
        }

        tracing::trace!(action = %action.name(), state_changed, "action processed");
    }
}

/// Glob matching supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < text.len() {
        match pattern.get(pi).copied() {
            Some('*') => {
                backtrack = Some((pi, ti));
                pi += 1;
            }
            Some(c) if c == '?' || c == text[ti] => {
                pi += 1;
                ti += 1;
            }
            _ => match backtrack {
                Some((star_pi, star_ti)) => {
                    pi = star_pi + 1;
                    ti = star_ti + 1;
                    backtrack = Some((star_pi, star_ti + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}
