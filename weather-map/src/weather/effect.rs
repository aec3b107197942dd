//! Side effects of the weather store and their handler.

use std::sync::Arc;

use map_dispatch::{EffectContext, TaskKey};

use super::action::WeatherAction;
use super::state::{RequestId, WeatherType};
use crate::api::WeatherSource;
use crate::map::Region;

/// Task key of the in-flight fetch. A new fetch replaces the previous one.
pub const FETCH_TASK: TaskKey = TaskKey::new("weather");

#[derive(Clone, Debug, PartialEq)]
pub enum WeatherEffect {
    /// Ask the backend for readings
    FetchReadings {
        request: RequestId,
        weather_type: WeatherType,
        regions: Vec<Region>,
    },
    /// Abort the in-flight fetch, if any
    CancelFetch,
}

/// Run a weather effect against `source`.
///
/// Must be called from within a tokio runtime.
pub fn handle_effect(
    effect: WeatherEffect,
    ctx: &mut EffectContext<WeatherAction>,
    source: &Arc<dyn WeatherSource>,
) {
    match effect {
        WeatherEffect::FetchReadings {
            request,
            weather_type,
            regions,
        } => {
            let source = Arc::clone(source);
            ctx.tasks().spawn(FETCH_TASK, async move {
                match source.fetch_readings(&weather_type, &regions).await {
                    Ok(readings) => WeatherAction::WeatherDidLoad { request, readings },
                    Err(e) => {
                        tracing::warn!(%request, error = %e, "weather request failed");
                        WeatherAction::WeatherDidFail {
                            request,
                            failure: e.failure(),
                        }
                    }
                }
            });
        }
        WeatherEffect::CancelFetch => {
            ctx.tasks().cancel(FETCH_TASK);
        }
    }
}
