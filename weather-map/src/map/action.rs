use map_dispatch::ActionSummary;

use super::state::{GeoJson, HoveredRegion, Region};

/// Region store actions, all in the `map` category.
#[derive(map_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum MapAction {
    /// Replace the visible region list
    MapSetVisibleRegions(Vec<Region>),
    MapSetHoveredRegion(HoveredRegion),
    MapClearHoveredRegion,
    /// Replace the stored geography document
    MapSetGeoJson(GeoJson),
}

impl ActionSummary for MapAction {
    fn summary(&self) -> String {
        match self {
            MapAction::MapSetVisibleRegions(regions) => {
                format!("MapSetVisibleRegions({} regions)", regions.len())
            }
            MapAction::MapSetGeoJson(doc) => {
                format!("MapSetGeoJson({} features)", doc.feature_count())
            }
            other => format!("{other:?}"),
        }
    }
}
