//! Weather data store
//!
//! Holds the selected weather metric and the readings fetched for the
//! visible regions. A fetch is a two-phase exchange: `WeatherFetch` bumps
//! the request generation and emits [`WeatherEffect::FetchReadings`]; the
//! spawned task answers with `WeatherDidLoad` or `WeatherDidFail` carrying
//! the same [`RequestId`]. Answers for an older generation are dropped.

mod action;
mod effect;
mod reducer;
mod state;

pub use action::{WeatherAction, WeatherActionCategory};
pub use effect::{handle_effect, WeatherEffect, FETCH_TASK};
pub use reducer::reducer;
pub use state::{
    has_usable_value, normalize_readings, FetchFailure, Reading, ReadingFilter, RegionReading,
    RequestId, WeatherState, WeatherType, FALLBACK_LABEL, FETCH_FAILED_MESSAGE,
    MISSING_VALUE_SENTINELS, UNEXPECTED_SHAPE_MESSAGE,
};

use map_dispatch::{ActionLoggerConfig, ActionLoggerMiddleware, EffectRuntime, Store};

/// The weather store: effect reducer with action logging, driven by a
/// runtime that executes fetches as keyed tasks.
pub type WeatherStore =
    EffectRuntime<WeatherState, WeatherAction, WeatherEffect, ActionLoggerMiddleware>;

pub fn weather_store_with_logger(state: WeatherState, config: ActionLoggerConfig) -> WeatherStore {
    EffectRuntime::new(Store::new(state, reducer, ActionLoggerMiddleware::new(config)))
}
