//! Configuration for the monitor
//!
//! Every tunable constant (thresholds, intervals, default radius, toast
//! durations, map defaults) lives here and is injected at startup. All
//! fields have defaults, so an empty TOML file is a valid configuration.

use firewatch_domain::{ConfidenceThresholds, RadiusKm, UserLocation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value violates its constraints
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Monitor configuration
///
/// # Examples
///
/// ```
/// use firewatch_monitor::MonitorConfig;
///
/// let config = MonitorConfig::from_toml_str("poll_interval_secs = 30").unwrap();
/// assert_eq!(config.poll_interval_secs, 30);
/// assert_eq!(config.default_radius_km, 50.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Base URL of the hazard backend
    pub api_base_url: String,

    /// Interval of both the hazard poll and the proximity check (seconds)
    /// Default: 120
    pub poll_interval_secs: u64,

    /// Radius selected when the session starts (km)
    /// Default: 50
    pub default_radius_km: f64,

    /// Per-request deadline (seconds); absent means transport defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Tag shared by all platform notifications so they replace each other
    pub notification_tag: String,

    /// Severity thresholds
    pub thresholds: ThresholdConfig,

    /// In-app message durations
    pub display: DisplayConfig,

    /// Map viewport defaults
    pub map: MapConfig,

    /// Tile provider
    pub tiles: TileConfig,
}

/// Severity thresholds (confidence, 0-100)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum confidence for High. Default: 80
    pub high: f64,
    /// Minimum confidence for Normal. Default: 60
    pub normal: f64,
}

/// Durations of in-app messages, in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Toast raised by clicking a marker. Default: 8000
    pub marker_toast_ms: u64,
    /// "Nearby fire!" toast. Default: 8000
    pub nearby_toast_ms: u64,
    /// "No fires within ..." toast. Default: 3500
    pub no_hazards_toast_ms: u64,
    /// "Alerts enabled" toast. Default: 4000
    pub alerts_enabled_toast_ms: u64,
    /// "Radius updated" toast. Default: 3000
    pub radius_updated_toast_ms: u64,
}

/// Map viewport defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial center latitude. Default: 20
    pub initial_latitude: f64,
    /// Initial center longitude. Default: 0
    pub initial_longitude: f64,
    /// Initial zoom. Default: 2
    pub initial_zoom: u8,
    /// Zoom used when centering on the user. Default: 8
    pub locate_zoom: u8,
}

/// Tile provider selection
///
/// Without a `url_template` the public OpenStreetMap tiles are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,
    /// Attribution text for a custom provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Maximum zoom level. Default: 18
    pub max_zoom: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            poll_interval_secs: 120,
            default_radius_km: 50.0,
            request_timeout_secs: None,
            notification_tag: "wildfire-alert".to_string(),
            thresholds: ThresholdConfig::default(),
            display: DisplayConfig::default(),
            map: MapConfig::default(),
            tiles: TileConfig::default(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let defaults = ConfidenceThresholds::default();
        Self {
            high: defaults.high,
            normal: defaults.normal,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            marker_toast_ms: 8000,
            nearby_toast_ms: 8000,
            no_hazards_toast_ms: 3500,
            alerts_enabled_toast_ms: 4000,
            radius_updated_toast_ms: 3000,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_latitude: 20.0,
            initial_longitude: 0.0,
            initial_zoom: 2,
            locate_zoom: 8,
        }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: None,
            attribution: None,
            max_zoom: 18,
        }
    }
}

impl MonitorConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.notification_tag.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "notification_tag must not be empty".to_string(),
            ));
        }
        RadiusKm::new(self.default_radius_km)
            .map_err(|e| ConfigError::Invalid(format!("default_radius_km: {}", e)))?;
        self.confidence_thresholds()
            .validate()
            .map_err(ConfigError::Invalid)?;
        UserLocation::new(self.map.initial_latitude, self.map.initial_longitude)
            .map_err(|e| ConfigError::Invalid(format!("map: {}", e)))?;
        Ok(())
    }

    /// Poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Request timeout as Duration, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Default radius as a validated value
    pub fn default_radius(&self) -> Result<RadiusKm, ConfigError> {
        RadiusKm::new(self.default_radius_km).map_err(ConfigError::Invalid)
    }

    /// Severity thresholds as a domain value
    pub fn confidence_thresholds(&self) -> ConfidenceThresholds {
        ConfidenceThresholds {
            high: self.thresholds.high,
            normal: self.thresholds.normal,
        }
    }
}

impl DisplayConfig {
    /// Marker click toast duration
    pub fn marker_toast(&self) -> Duration {
        Duration::from_millis(self.marker_toast_ms)
    }

    /// Nearby alert toast duration
    pub fn nearby_toast(&self) -> Duration {
        Duration::from_millis(self.nearby_toast_ms)
    }

    /// "No fires" toast duration
    pub fn no_hazards_toast(&self) -> Duration {
        Duration::from_millis(self.no_hazards_toast_ms)
    }

    /// "Alerts enabled" toast duration
    pub fn alerts_enabled_toast(&self) -> Duration {
        Duration::from_millis(self.alerts_enabled_toast_ms)
    }

    /// "Radius updated" toast duration
    pub fn radius_updated_toast(&self) -> Duration {
        Duration::from_millis(self.radius_updated_toast_ms)
    }
}

impl MapConfig {
    /// Initial map center
    pub fn initial_center(&self) -> Result<UserLocation, ConfigError> {
        UserLocation::new(self.initial_latitude, self.initial_longitude)
            .map_err(ConfigError::Invalid)
    }
}
