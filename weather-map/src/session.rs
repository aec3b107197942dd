//! The glue a map view provides between the two stores.
//!
//! Whenever the visible regions or the selected weather type change, the
//! session asks the weather store to fetch readings for the regions that
//! are visible at that moment.

use std::sync::Arc;

use map_dispatch::ActionLoggerConfig;

use crate::api::WeatherSource;
use crate::map::{
    region_store_with_logger, GeoJson, HoveredRegion, MapAction, Region, RegionState, RegionStore,
};
use crate::weather::{
    handle_effect, weather_store_with_logger, WeatherAction, WeatherState, WeatherStore,
    WeatherType,
};

/// A region store and a weather store wired to a [`WeatherSource`].
///
/// Methods that may start a fetch must be called from within a tokio
/// runtime.
pub struct MapSession {
    regions: RegionStore,
    weather: WeatherStore,
    source: Arc<dyn WeatherSource>,
}

impl MapSession {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self::with_weather_state(source, WeatherState::default())
    }

    /// Start from a prepared weather state, e.g. another selected type.
    pub fn with_weather_state(source: Arc<dyn WeatherSource>, state: WeatherState) -> Self {
        Self::with_logger(source, state, ActionLoggerConfig::default())
    }

    pub fn with_logger(
        source: Arc<dyn WeatherSource>,
        state: WeatherState,
        config: ActionLoggerConfig,
    ) -> Self {
        Self {
            regions: region_store_with_logger(config.clone()),
            weather: weather_store_with_logger(state, config),
            source,
        }
    }

    pub fn regions(&self) -> &RegionState {
        self.regions.state()
    }

    pub fn weather(&self) -> &WeatherState {
        self.weather.state()
    }

    /// Record what the viewport shows, then fetch readings for it.
    pub fn set_visible_regions(&mut self, regions: Vec<Region>) {
        if self.regions.dispatch(MapAction::MapSetVisibleRegions(regions)) {
            self.refresh();
        }
    }

    /// Select a weather type, then fetch it for the visible regions.
    pub fn select_weather_type(&mut self, weather_type: WeatherType) {
        if self.dispatch_weather(WeatherAction::WeatherSetType(weather_type)) {
            self.refresh();
        }
    }

    /// Deselect the weather type. The follow-up fetch is skipped and clears
    /// the readings.
    pub fn clear_weather_type(&mut self) {
        if self.dispatch_weather(WeatherAction::WeatherClearType) {
            self.refresh();
        }
    }

    pub fn hover_region(&mut self, info: HoveredRegion) {
        self.regions.dispatch(MapAction::MapSetHoveredRegion(info));
    }

    pub fn clear_hover(&mut self) {
        self.regions.dispatch(MapAction::MapClearHoveredRegion);
    }

    pub fn set_geo_json(&mut self, doc: GeoJson) {
        self.regions.dispatch(MapAction::MapSetGeoJson(doc));
    }

    /// Fetch readings for the currently visible regions.
    pub fn refresh(&mut self) {
        let regions = self.regions.state().visible_regions.clone();
        self.dispatch_weather(WeatherAction::WeatherFetch(regions));
    }

    /// Apply results that already arrived, without waiting.
    pub fn process_pending(&mut self) -> usize {
        let source = &self.source;
        self.weather
            .process_pending(|effect, ctx| handle_effect(effect, ctx, source))
    }

    /// Wait until the in-flight fetch, if any, has been applied.
    pub async fn settle(&mut self) -> bool {
        let source = &self.source;
        self.weather
            .settle(|effect, ctx| handle_effect(effect, ctx, source))
            .await
    }

    fn dispatch_weather(&mut self, action: WeatherAction) -> bool {
        let source = &self.source;
        self.weather
            .dispatch(action, |effect, ctx| handle_effect(effect, ctx, source))
    }
}

impl std::fmt::Debug for MapSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSession")
            .field("regions", self.regions.state())
            .field("weather", self.weather.state())
            .finish_non_exhaustive()
    }
}
