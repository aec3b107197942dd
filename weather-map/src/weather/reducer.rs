use map_dispatch::DispatchResult;

use super::action::WeatherAction;
use super::effect::WeatherEffect;
use super::state::{normalize_readings, WeatherState};

/// Weather store reducer.
///
/// Every fetch outcome replaces `weather_data` wholesale. Data from the
/// previous fetch stays visible while the next one is loading.
pub fn reducer(state: &mut WeatherState, action: WeatherAction) -> DispatchResult<WeatherEffect> {
    match action {
        WeatherAction::WeatherSetType(weather_type) => {
            tracing::info!(weather_type = %weather_type, "weather type selected");
            state.selected_weather_type = Some(weather_type);
            DispatchResult::changed()
        }

        WeatherAction::WeatherClearType => {
            tracing::info!("weather type cleared");
            state.selected_weather_type = None;
            DispatchResult::changed()
        }

        WeatherAction::WeatherFetch(regions) => {
            let weather_type = match &state.selected_weather_type {
                Some(t) if !regions.is_empty() => t.clone(),
                selected => {
                    tracing::warn!(
                        weather_type = ?selected,
                        regions = regions.len(),
                        "weather fetch skipped: no weather type or no regions"
                    );
                    // Any fetch still in flight no longer matches what is shown,
                    // and an earlier failure no longer describes the latest attempt.
                    let was_loading = state.is_loading;
                    state.latest_request = state.latest_request.next();
                    state.weather_data.clear();
                    state.is_loading = false;
                    state.error = None;

                    let result = DispatchResult::changed();
                    return if was_loading {
                        result.with(WeatherEffect::CancelFetch)
                    } else {
                        result
                    };
                }
            };

            let request = state.latest_request.next();
            state.latest_request = request;
            state.is_loading = true;
            state.error = None;

            tracing::info!(
                %request,
                weather_type = %weather_type,
                regions = regions.len(),
                "fetching weather data"
            );
            DispatchResult::changed_with(WeatherEffect::FetchReadings {
                request,
                weather_type,
                regions,
            })
        }

        WeatherAction::WeatherDidLoad { request, readings } => {
            if request != state.latest_request {
                tracing::debug!(%request, latest = %state.latest_request, "discarding stale weather data");
                return DispatchResult::unchanged();
            }

            state.weather_data = normalize_readings(readings, state.reading_filter);
            state.is_loading = false;
            tracing::info!(
                %request,
                readings = state.weather_data.len(),
                "weather data loaded"
            );
            DispatchResult::changed()
        }

        WeatherAction::WeatherDidFail { request, failure } => {
            if request != state.latest_request {
                tracing::debug!(%request, latest = %state.latest_request, "discarding stale weather failure");
                return DispatchResult::unchanged();
            }

            let message = failure.message();
            tracing::error!(%request, error = %message, "failed to load weather data");
            state.error = Some(message);
            state.weather_data.clear();
            state.is_loading = false;
            DispatchResult::changed()
        }
    }
}
