//! Client-side state for a weather-on-map application.
//!
//! Two independent stores:
//!
//! - [`map`]: which regions are on screen, which one is hovered, and the
//!   loaded geography document.
//! - [`weather`]: the selected weather metric and the readings fetched for
//!   the visible regions.
//!
//! [`session::MapSession`] wires them together the way a map view does:
//! when the visible regions or the selected metric change, it asks the
//! weather store to fetch readings for the current regions.

pub mod api;
pub mod config;
pub mod map;
pub mod session;
pub mod weather;

pub use api::{HttpWeatherClient, WeatherApiError, WeatherSource};
pub use config::{ClientConfig, ConfigError};
pub use map::{GeoJson, HoveredRegion, MapAction, Region, RegionState, RegionStore};
pub use session::MapSession;
pub use weather::{
    FetchFailure, Reading, RegionReading, RequestId, WeatherAction, WeatherEffect, WeatherState,
    WeatherStore, WeatherType,
};
