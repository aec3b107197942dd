//! Client configuration and region input parsing

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use crate::api::REGIONS_PATH;
use crate::map::Region;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("invalid region {0:?}, expected CODE:LAT:LON")]
    InvalidRegion(String),

    #[error("failed to read regions file {}", path.display())]
    ReadRegions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("regions file {} is not a JSON array of {{code, lat, lon}}", path.display())]
    ParseRegions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the weather backend lives and how long a request may take.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Whole-request timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self {
                base_url: url,
                timeout,
            }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// The readings endpoint under this base URL.
    pub fn endpoint(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(REGIONS_PATH);
        url.set_query(None);
        url
    }
}

/// Parse `CODE:LAT:LON`, e.g. `11110:37.57:126.98`.
pub fn parse_region(s: &str) -> Result<Region, ConfigError> {
    let invalid = || ConfigError::InvalidRegion(s.to_string());

    let mut parts = s.split(':').map(str::trim);
    let (Some(code), Some(lat), Some(lon), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if code.is_empty() {
        return Err(invalid());
    }

    let lat: f64 = lat.parse().map_err(|_| invalid())?;
    let lon: f64 = lon.parse().map_err(|_| invalid())?;
    Ok(Region::new(code, lat, lon))
}

/// Read a JSON array of `{code, lat, lon}` objects.
pub fn load_regions_file(path: &Path) -> Result<Vec<Region>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadRegions {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ConfigError::ParseRegions {
        path: path.to_path_buf(),
        source,
    })
}
