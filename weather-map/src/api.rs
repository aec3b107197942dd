//! Backend weather client
//!
//! One call: `POST /api/weather/regions?type=<code>` with the regions as a
//! JSON array body, answered by a JSON array of region readings. The
//! store only sees the [`WeatherSource`] trait, so tests and other
//! backends can stand in for [`HttpWeatherClient`].

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::config::ClientConfig;
use crate::map::Region;
use crate::weather::{FetchFailure, RegionReading, WeatherType};

/// Endpoint path, resolved against the configured base URL.
pub const REGIONS_PATH: &str = "/api/weather/regions";

/// Anything that can produce readings for a set of regions.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_readings(
        &self,
        weather_type: &WeatherType,
        regions: &[Region],
    ) -> Result<Vec<RegionReading>, WeatherApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherApiError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service responded with {0}")]
    Status(StatusCode),

    #[error("unexpected weather data format")]
    UnexpectedShape,
}

impl WeatherApiError {
    /// How the weather store records this error.
    pub fn failure(&self) -> FetchFailure {
        match self {
            WeatherApiError::Request(_) | WeatherApiError::Status(_) => {
                FetchFailure::Transport(Some(self.to_string()))
            }
            WeatherApiError::UnexpectedShape => FetchFailure::UnexpectedShape,
        }
    }
}

impl From<WeatherApiError> for FetchFailure {
    fn from(e: WeatherApiError) -> Self {
        e.failure()
    }
}

/// [`WeatherSource`] backed by the weather backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpWeatherClient {
    pub fn new(config: &ClientConfig) -> Result<Self, WeatherApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherClient {
    async fn fetch_readings(
        &self,
        weather_type: &WeatherType,
        regions: &[Region],
    ) -> Result<Vec<RegionReading>, WeatherApiError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            weather_type = %weather_type,
            regions = regions.len(),
            "requesting weather readings"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("type", weather_type.code())])
            .json(regions)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherApiError::Status(status));
        }

        let body = response.bytes().await?;
        parse_readings(&body)
    }
}

/// Parse a response body into readings.
///
/// A body that is not a JSON array is [`WeatherApiError::UnexpectedShape`].
/// Entries of the array that are not `{regionCode, value, unit}` objects
/// with string fields are skipped; the rest are kept.
pub fn parse_readings(body: &[u8]) -> Result<Vec<RegionReading>, WeatherApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "weather response is not JSON");
        WeatherApiError::UnexpectedShape
    })?;

    let serde_json::Value::Array(entries) = value else {
        tracing::debug!(body = %value, "weather response is not an array");
        return Err(WeatherApiError::UnexpectedShape);
    };

    let readings = entries
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<RegionReading>(entry) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed weather reading");
                    None
                }
            },
        )
        .collect();

    Ok(readings)
}
