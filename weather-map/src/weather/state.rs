use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label used when no weather type is selected or the type is unknown.
pub const FALLBACK_LABEL: &str = "weather";

/// Error message for a failed fetch that carried no message of its own.
pub const FETCH_FAILED_MESSAGE: &str = "failed to load weather data";

/// Error message for a response body that is not a list of readings.
pub const UNEXPECTED_SHAPE_MESSAGE: &str = "unexpected weather data format";

/// Values the backend sends in place of a reading when it has none.
pub const MISSING_VALUE_SENTINELS: [&str; 2] = ["Error", "N/A"];

/// Weather metric shown on the map.
///
/// On the wire this is the bare code string (`"TMP"`). Codes outside the
/// known four are kept as `Other` so they still reach the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherType {
    /// Current temperature
    Tmp,
    /// Relative humidity
    Reh,
    /// Precipitation probability
    Pop,
    /// Wind speed
    Wsd,
    Other(String),
}

impl WeatherType {
    pub const KNOWN: [WeatherType; 4] = [
        WeatherType::Tmp,
        WeatherType::Reh,
        WeatherType::Pop,
        WeatherType::Wsd,
    ];

    pub fn code(&self) -> &str {
        match self {
            WeatherType::Tmp => "TMP",
            WeatherType::Reh => "REH",
            WeatherType::Pop => "POP",
            WeatherType::Wsd => "WSD",
            WeatherType::Other(code) => code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherType::Tmp => "current temperature",
            WeatherType::Reh => "humidity",
            WeatherType::Pop => "precipitation probability",
            WeatherType::Wsd => "wind speed",
            WeatherType::Other(_) => FALLBACK_LABEL,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WeatherType::Other(_))
    }
}

impl FromStr for WeatherType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let known = WeatherType::KNOWN
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code));
        Ok(known.unwrap_or_else(|| WeatherType::Other(code.to_string())))
    }
}

impl From<String> for WeatherType {
    fn from(code: String) -> Self {
        match code.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<WeatherType> for String {
    fn from(t: WeatherType) -> Self {
        match t {
            WeatherType::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One region's value for the selected metric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub value: String,
    pub unit: String,
}

impl Reading {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// A response entry: `{"regionCode", "value", "unit"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionReading {
    pub region_code: String,
    pub value: String,
    pub unit: String,
    /// Echo of the requested type; the backend sends it, nothing relies on it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_type: Option<WeatherType>,
}

impl RegionReading {
    pub fn new(
        region_code: impl Into<String>,
        value: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            region_code: region_code.into(),
            value: value.into(),
            unit: unit.into(),
            weather_type: None,
        }
    }
}

/// Decides which response entries are stored.
pub type ReadingFilter = fn(&RegionReading) -> bool;

/// Rejects entries whose value is one of the backend's "no data" sentinels.
pub fn has_usable_value(reading: &RegionReading) -> bool {
    !MISSING_VALUE_SENTINELS.contains(&reading.value.as_str())
}

/// Build the region-code mapping from a response.
///
/// Later entries for the same code overwrite earlier ones.
pub fn normalize_readings(
    readings: Vec<RegionReading>,
    keep: ReadingFilter,
) -> HashMap<String, Reading> {
    let mut data = HashMap::with_capacity(readings.len());
    for entry in readings {
        if !keep(&entry) {
            tracing::warn!(
                region = %entry.region_code,
                value = %entry.value,
                "no usable reading for region"
            );
            continue;
        }
        data.insert(
            entry.region_code,
            Reading {
                value: entry.value,
                unit: entry.unit,
            },
        );
    }
    data
}

/// Why a fetch produced no readings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request failed or was rejected, with the transport's message if any
    Transport(Option<String>),
    /// The body was not a list of readings
    UnexpectedShape,
}

impl FetchFailure {
    /// The text stored in `WeatherState::error`.
    pub fn message(&self) -> String {
        match self {
            FetchFailure::Transport(Some(message)) if !message.is_empty() => message.clone(),
            FetchFailure::Transport(_) => FETCH_FAILED_MESSAGE.to_string(),
            FetchFailure::UnexpectedShape => UNEXPECTED_SHAPE_MESSAGE.to_string(),
        }
    }
}

/// Generation number of a fetch.
///
/// Each accepted fetch gets the next id; only the result carrying the
/// latest id is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct WeatherState {
    pub selected_weather_type: Option<WeatherType>,
    /// Readings by region code, replaced wholesale by every fetch outcome
    pub weather_data: HashMap<String, Reading>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Id of the most recent fetch; results for older ids are dropped
    pub latest_request: RequestId,
    pub reading_filter: ReadingFilter,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::new(Some(WeatherType::Tmp))
    }
}

impl WeatherState {
    pub fn new(selected_weather_type: Option<WeatherType>) -> Self {
        Self {
            selected_weather_type,
            weather_data: HashMap::new(),
            is_loading: false,
            error: None,
            latest_request: RequestId::default(),
            reading_filter: has_usable_value,
        }
    }

    /// Replace the filter applied to response entries.
    pub fn with_reading_filter(mut self, filter: ReadingFilter) -> Self {
        self.reading_filter = filter;
        self
    }

    pub fn reading_for(&self, code: &str) -> Option<&Reading> {
        self.weather_data.get(code)
    }

    pub fn has_any_reading(&self) -> bool {
        !self.weather_data.is_empty()
    }

    pub fn selected_type_label(&self) -> &'static str {
        self.selected_weather_type
            .as_ref()
            .map_or(FALLBACK_LABEL, WeatherType::label)
    }
}
