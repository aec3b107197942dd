use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An administrative region and its representative point.
///
/// Serializes as `{"code": ..., "lat": ..., "lon": ...}`, the element shape
/// of the weather request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub lat: f64,
    pub lon: f64,
}

impl Region {
    pub fn new(code: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            code: code.into(),
            lat,
            lon,
        }
    }
}

/// Display information about the region under the pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoveredRegion {
    pub code: String,
    pub name: String,
}

impl HoveredRegion {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A geography document, kept as raw JSON.
///
/// The store never interprets it beyond counting features for logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoJson(pub Value);

impl GeoJson {
    /// Number of entries in the top-level `features` array, 0 if there is none.
    pub fn feature_count(&self) -> usize {
        self.0
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for GeoJson {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionState {
    /// Regions currently inside the viewport, in the order the view reported them
    pub visible_regions: Vec<Region>,
    pub hovered_region: Option<HoveredRegion>,
    pub geo_json: Option<GeoJson>,
}

impl RegionState {
    pub fn is_visible(&self, code: &str) -> bool {
        self.visible_regions.iter().any(|r| r.code == code)
    }

    pub fn hovered_code(&self) -> Option<&str> {
        self.hovered_region.as_ref().map(|h| h.code.as_str())
    }
}
