//! Map tile source selection

use crate::config::TileConfig;
use std::fmt;

/// Public OpenStreetMap tile template
pub const OSM_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by OpenStreetMap
pub const OSM_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Resolved base-map tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    /// URL template with `{z}`, `{x}`, `{y}` placeholders
    pub url_template: String,
    /// Attribution text
    pub attribution: String,
    /// Highest zoom level served
    pub max_zoom: u8,
}

impl TileSource {
    /// Use the configured template, or OpenStreetMap when none is set
    pub fn resolve(config: &TileConfig) -> Self {
        match config.url_template.as_deref().map(str::trim) {
            Some(template) if !template.is_empty() => Self {
                url_template: template.to_string(),
                attribution: config.attribution.clone().unwrap_or_default(),
                max_zoom: config.max_zoom,
            },
            _ => Self {
                url_template: OSM_TEMPLATE.to_string(),
                attribution: config
                    .attribution
                    .clone()
                    .unwrap_or_else(|| OSM_ATTRIBUTION.to_string()),
                max_zoom: config.max_zoom,
            },
        }
    }

    /// Whether this is the public OpenStreetMap default
    pub fn is_default(&self) -> bool {
        self.url_template == OSM_TEMPLATE
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            write!(f, "OpenStreetMap")?;
        } else {
            write!(f, "{}", self.url_template)?;
        }
        write!(f, " (max zoom {})", self.max_zoom)?;

        let attribution = self.attribution.replace("&copy;", "\u{a9}");
        if !attribution.is_empty() {
            write!(f, ", {}", attribution)?;
        }
        Ok(())
    }
}
