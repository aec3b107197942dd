use super::action::MapAction;
use super::state::RegionState;

/// Region store reducer.
///
/// Every action reports a change, even when the new value equals the old
/// one, so observers refetch on every viewport report.
pub fn reducer(state: &mut RegionState, action: MapAction) -> bool {
    match action {
        MapAction::MapSetVisibleRegions(regions) => {
            state.visible_regions = regions;
            tracing::info!(
                count = state.visible_regions.len(),
                "visible regions updated"
            );
            true
        }

        MapAction::MapSetHoveredRegion(info) => {
            state.hovered_region = Some(info);
            true
        }

        MapAction::MapClearHoveredRegion => {
            state.hovered_region = None;
            true
        }

        MapAction::MapSetGeoJson(doc) => {
            tracing::info!(features = doc.feature_count(), "geography loaded");
            state.geo_json = Some(doc);
            true
        }
    }
}
