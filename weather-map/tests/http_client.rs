//! Wire contract of `HttpWeatherClient` against an in-process backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use weather_map::{
    ClientConfig, HttpWeatherClient, MapSession, Reading, Region, WeatherApiError, WeatherSource,
    WeatherType,
};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(HashMap<String, String>, Value)>>>,
}

async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> HttpWeatherClient {
    let config = ClientConfig::new(&format!("http://{addr}"), None).unwrap();
    HttpWeatherClient::new(&config).unwrap()
}

/// Backend that echoes one reading per region, with a sentinel for code "99".
async fn regions_handler(
    State(captured): State<Captured>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let weather_type = params.get("type").cloned().unwrap_or_default();
    let entries: Vec<Value> = body
        .as_array()
        .map(|regions| {
            regions
                .iter()
                .map(|r| {
                    let code = r["code"].as_str().unwrap_or_default();
                    let value = if code == "99" { "N/A" } else { "25" };
                    json!({
                        "regionCode": code,
                        "weatherType": weather_type,
                        "value": value,
                        "unit": "C"
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    captured.requests.lock().unwrap().push((params, body));
    Json(Value::Array(entries))
}

fn echo_backend(captured: Captured) -> Router {
    Router::new()
        .route("/api/weather/regions", post(regions_handler))
        .with_state(captured)
}

#[tokio::test]
async fn posts_regions_with_type_query() {
    let captured = Captured::default();
    let addr = spawn_backend(echo_backend(captured.clone())).await;
    let client = client_for(addr);

    let regions = vec![
        Region::new("11000", 37.56, 126.97),
        Region::new("99", 33.5, 126.5),
    ];
    let readings = client
        .fetch_readings(&WeatherType::Pop, &regions)
        .await
        .unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].region_code, "11000");
    assert_eq!(readings[0].weather_type, Some(WeatherType::Pop));
    assert_eq!(readings[1].value, "N/A");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (params, body) = &requests[0];
    assert_eq!(params.get("type").map(String::as_str), Some("POP"));
    assert_eq!(
        body,
        &json!([
            {"code": "11000", "lat": 37.56, "lon": 126.97},
            {"code": "99", "lat": 33.5, "lon": 126.5}
        ])
    );
}

#[tokio::test]
async fn session_filters_sentinels_from_backend() {
    let addr = spawn_backend(echo_backend(Captured::default())).await;
    let mut session = MapSession::new(Arc::new(client_for(addr)));

    session.set_visible_regions(vec![
        Region::new("11000", 37.56, 126.97),
        Region::new("99", 33.5, 126.5),
    ]);
    session.settle().await;

    let weather = session.weather();
    assert_eq!(weather.error, None);
    assert_eq!(weather.reading_for("11000"), Some(&Reading::new("25", "C")));
    assert_eq!(weather.reading_for("99"), None);
}

#[tokio::test]
async fn non_array_body_is_unexpected_shape() {
    let router = Router::new().route(
        "/api/weather/regions",
        post(|| async { Json(json!({"message": "ok"})) }),
    );
    let client = client_for(spawn_backend(router).await);

    let result = client
        .fetch_readings(&WeatherType::Tmp, &[Region::new("11000", 37.56, 126.97)])
        .await;
    assert!(matches!(result, Err(WeatherApiError::UnexpectedShape)));
}

#[tokio::test]
async fn error_status_is_rejected() {
    let router = Router::new().route(
        "/api/weather/regions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let client = client_for(spawn_backend(router).await);

    let result = client
        .fetch_readings(&WeatherType::Tmp, &[Region::new("11000", 37.56, 126.97)])
        .await;
    assert!(matches!(
        result,
        Err(WeatherApiError::Status(status)) if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn unreachable_backend_is_request_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = MapSession::new(Arc::new(client_for(addr)));
    session.set_visible_regions(vec![Region::new("11000", 37.56, 126.97)]);
    session.settle().await;

    let weather = session.weather();
    assert!(weather.error.is_some());
    assert!(!weather.has_any_reading());
    assert!(!weather.is_loading);
}

#[tokio::test]
async fn malformed_entries_are_dropped_not_the_response() {
    let router = Router::new().route(
        "/api/weather/regions",
        post(|| async {
            Json(json!([
                {"regionCode": "11000", "value": "25", "unit": "C"},
                {"regionCode": "26000", "value": null, "unit": "C"}
            ]))
        }),
    );
    let mut session = MapSession::new(Arc::new(client_for(spawn_backend(router).await)));

    session.set_visible_regions(vec![
        Region::new("11000", 37.56, 126.97),
        Region::new("26000", 35.18, 129.08),
    ]);
    session.settle().await;

    let weather = session.weather();
    assert_eq!(weather.error, None);
    assert_eq!(weather.reading_for("11000"), Some(&Reading::new("25", "C")));
    assert_eq!(weather.reading_for("26000"), None);
}
