//! End-to-end store behaviour through `MapSession` with scripted sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use weather_map::weather::{FETCH_FAILED_MESSAGE, UNEXPECTED_SHAPE_MESSAGE};
use weather_map::{
    GeoJson, HoveredRegion, MapSession, Reading, Region, RegionReading, WeatherApiError,
    WeatherSource, WeatherState, WeatherType,
};

type Reply = Result<Vec<RegionReading>, WeatherApiError>;

/// Answers each call with the next scripted reply, after an optional delay.
#[derive(Default)]
struct ScriptedSource {
    replies: Mutex<Vec<(Duration, Reply)>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<(WeatherType, Vec<String>)>>,
}

impl ScriptedSource {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Self::delayed(replies.into_iter().map(|r| (Duration::ZERO, r)).collect())
    }

    fn delayed(replies: Vec<(Duration, Reply)>) -> Arc<Self> {
        let mut replies = replies;
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn requested(&self) -> Vec<(WeatherType, Vec<String>)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for ScriptedSource {
    async fn fetch_readings(
        &self,
        weather_type: &WeatherType,
        regions: &[Region],
    ) -> Result<Vec<RegionReading>, WeatherApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push((
            weather_type.clone(),
            regions.iter().map(|r| r.code.clone()).collect(),
        ));

        let next = self.replies.lock().unwrap().pop();
        let (delay, reply) = next.unwrap_or((Duration::ZERO, Ok(vec![])));
        tokio::time::sleep(delay).await;
        reply
    }
}

fn seoul_busan() -> Vec<Region> {
    vec![
        Region::new("11000", 37.56, 126.97),
        Region::new("21000", 35.17, 129.07),
    ]
}

fn reading(code: &str, value: &str, unit: &str) -> RegionReading {
    RegionReading::new(code, value, unit)
}

#[tokio::test]
async fn visible_regions_trigger_fetch() {
    let source = ScriptedSource::new(vec![Ok(vec![
        reading("11000", "25", "C"),
        reading("21000", "N/A", ""),
    ])]);
    let mut session = MapSession::new(source.clone());

    session.set_visible_regions(seoul_busan());
    assert!(session.weather().is_loading);

    session.settle().await;

    let weather = session.weather();
    assert!(!weather.is_loading);
    assert_eq!(weather.error, None);
    assert_eq!(weather.reading_for("11000"), Some(&Reading::new("25", "C")));
    assert_eq!(weather.reading_for("21000"), None);
    assert!(weather.has_any_reading());
    assert_eq!(
        source.requested(),
        vec![(WeatherType::Tmp, vec!["11000".to_string(), "21000".to_string()])]
    );
}

#[tokio::test]
async fn selecting_type_refetches_current_regions() {
    let source = ScriptedSource::new(vec![
        Ok(vec![reading("11000", "25", "C")]),
        Ok(vec![reading("11000", "60", "%")]),
    ]);
    let mut session = MapSession::new(source.clone());

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    session.select_weather_type(WeatherType::Reh);
    session.settle().await;

    assert_eq!(source.calls(), 2);
    assert_eq!(source.requested()[1].0, WeatherType::Reh);
    assert_eq!(session.weather().selected_type_label(), "humidity");
    assert_eq!(
        session.weather().reading_for("11000"),
        Some(&Reading::new("60", "%"))
    );
}

#[tokio::test]
async fn empty_regions_skip_the_network() {
    let source = ScriptedSource::new(vec![Ok(vec![reading("11000", "25", "C")])]);
    let mut session = MapSession::new(source.clone());

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    assert!(session.weather().has_any_reading());

    session.set_visible_regions(vec![]);
    session.settle().await;

    assert_eq!(source.calls(), 1);
    assert!(!session.weather().has_any_reading());
    assert!(!session.weather().is_loading);
    assert_eq!(session.weather().error, None);
}

#[tokio::test]
async fn cleared_type_skips_the_network() {
    let source = ScriptedSource::new(vec![]);
    let mut session = MapSession::with_weather_state(source.clone(), WeatherState::new(None));

    session.set_visible_regions(seoul_busan());
    session.settle().await;

    assert_eq!(source.calls(), 0);
    assert!(!session.weather().has_any_reading());
    assert!(!session.weather().is_loading);
    assert_eq!(session.weather().selected_type_label(), "weather");

    session.select_weather_type(WeatherType::Wsd);
    session.settle().await;
    assert_eq!(source.calls(), 1);

    session.clear_weather_type();
    session.settle().await;
    assert_eq!(source.calls(), 1);
    assert_eq!(session.weather().selected_weather_type, None);
}

#[tokio::test]
async fn transport_failure_sets_error() {
    let source = ScriptedSource::new(vec![
        Ok(vec![reading("11000", "25", "C")]),
        Err(WeatherApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
    ]);
    let mut session = MapSession::new(source);

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    session.refresh();
    session.settle().await;

    let weather = session.weather();
    assert!(!weather.has_any_reading());
    assert!(!weather.is_loading);
    let error = weather.error.clone().unwrap_or_default();
    assert!(error.contains("500"), "unexpected error: {error}");
    assert_ne!(error, FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn unexpected_shape_sets_error_and_clears() {
    let source = ScriptedSource::new(vec![
        Ok(vec![reading("11000", "25", "C")]),
        Err(WeatherApiError::UnexpectedShape),
    ]);
    let mut session = MapSession::new(source);

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    session.refresh();
    session.settle().await;

    assert_eq!(
        session.weather().error.as_deref(),
        Some(UNEXPECTED_SHAPE_MESSAGE)
    );
    assert!(!session.weather().has_any_reading());
}

#[tokio::test]
async fn next_fetch_clears_previous_error() {
    let source = ScriptedSource::new(vec![
        Err(WeatherApiError::UnexpectedShape),
        Ok(vec![reading("11000", "25", "C")]),
    ]);
    let mut session = MapSession::new(source);

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    assert!(session.weather().error.is_some());

    session.refresh();
    assert_eq!(session.weather().error, None);
    session.settle().await;
    assert!(session.weather().has_any_reading());
}

#[tokio::test]
async fn scrolling_away_after_failure_clears_error() {
    let source = ScriptedSource::new(vec![Err(WeatherApiError::UnexpectedShape)]);
    let mut session = MapSession::new(source.clone());

    session.set_visible_regions(seoul_busan());
    session.settle().await;
    assert!(session.weather().error.is_some());

    session.set_visible_regions(vec![]);
    session.settle().await;

    assert_eq!(session.weather().error, None);
    assert!(!session.weather().has_any_reading());
    assert_eq!(source.calls(), 1);
}

/// Slow for two regions, immediate for one.
struct SlowForMany;

#[async_trait]
impl WeatherSource for SlowForMany {
    async fn fetch_readings(
        &self,
        _weather_type: &WeatherType,
        regions: &[Region],
    ) -> Result<Vec<RegionReading>, WeatherApiError> {
        if regions.len() > 1 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![reading("11000", "old", "C")])
        } else {
            Ok(vec![reading("11000", "new", "C")])
        }
    }
}

#[tokio::test]
async fn newer_fetch_wins_over_slower_older_one() {
    let mut session = MapSession::new(Arc::new(SlowForMany));

    session.set_visible_regions(seoul_busan());
    // Let the first request get underway
    tokio::task::yield_now().await;
    session.set_visible_regions(vec![Region::new("11000", 37.56, 126.97)]);
    session.settle().await;

    assert_eq!(
        session.weather().reading_for("11000"),
        Some(&Reading::new("new", "C"))
    );

    // Nothing from the superseded fetch shows up later
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(session.process_pending(), 0);
    assert_eq!(
        session.weather().reading_for("11000"),
        Some(&Reading::new("new", "C"))
    );
}

#[tokio::test]
async fn hover_and_geography_do_not_fetch() {
    let source = ScriptedSource::new(vec![]);
    let mut session = MapSession::new(source.clone());

    session.hover_region(HoveredRegion::new("11000", "Seoul"));
    session.set_geo_json(GeoJson::from(json!({
        "type": "FeatureCollection",
        "features": [{"type": "Feature", "properties": {"SIG_CD": "11000"}}]
    })));
    assert_eq!(session.regions().hovered_code(), Some("11000"));
    assert_eq!(
        session.regions().geo_json.as_ref().map(GeoJson::feature_count),
        Some(1)
    );

    session.clear_hover();
    assert_eq!(session.regions().hovered_region, None);

    session.settle().await;
    assert_eq!(source.calls(), 0);
    assert!(!session.weather().has_any_reading());
}
