//! Region visibility store
//!
//! Tracks what the map view currently shows: the regions inside the
//! viewport, the region under the pointer, and the geography document the
//! view was drawn from. Every mutation is a plain replacement, so this
//! store needs no effects.

mod action;
mod reducer;
mod state;

pub use action::{MapAction, MapActionCategory};
pub use reducer::reducer;
pub use state::{GeoJson, HoveredRegion, Region, RegionState};

use map_dispatch::{ActionLoggerConfig, ActionLoggerMiddleware, Store};

/// The region store as used by a map view: reducer plus action logging.
pub type RegionStore = Store<RegionState, MapAction, ActionLoggerMiddleware>;

/// Create an empty region store that logs every action.
pub fn region_store() -> RegionStore {
    region_store_with_logger(ActionLoggerConfig::default())
}

pub fn region_store_with_logger(config: ActionLoggerConfig) -> RegionStore {
    Store::new(RegionState::default(), reducer, ActionLoggerMiddleware::new(config))
}
