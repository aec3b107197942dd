use map_dispatch::ActionSummary;

use super::state::{FetchFailure, RegionReading, RequestId, WeatherType};
use crate::map::Region;

/// Weather store actions, all in the `weather` category.
///
/// `WeatherFetch` is the intent; `WeatherDidLoad` and `WeatherDidFail` carry
/// the outcome of the fetch they were issued for.
#[derive(map_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum WeatherAction {
    /// Select the metric. Does not fetch on its own.
    WeatherSetType(WeatherType),
    WeatherClearType,
    /// Fetch readings for these regions and the selected metric
    WeatherFetch(Vec<Region>),
    WeatherDidLoad {
        request: RequestId,
        readings: Vec<RegionReading>,
    },
    WeatherDidFail {
        request: RequestId,
        failure: FetchFailure,
    },
}

impl ActionSummary for WeatherAction {
    fn summary(&self) -> String {
        match self {
            WeatherAction::WeatherFetch(regions) => {
                format!("WeatherFetch({} regions)", regions.len())
            }
            WeatherAction::WeatherDidLoad { request, readings } => {
                format!("WeatherDidLoad({request}, {} readings)", readings.len())
            }
            other => format!("{other:?}"),
        }
    }
}
