//! View model handed to the map and message surfaces
//!
//! These types describe *what* to show; how it is drawn belongs to the
//! implementations of the traits in [`crate::traits`].

use crate::{SeverityTier, UserLocation};
use std::time::Duration;

/// Styling of a single hazard marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Severity tier the style was derived from
    pub tier: SeverityTier,
    /// Stroke and fill color (CSS hex)
    pub color: &'static str,
    /// Marker radius in pixels
    pub radius_px: u32,
    /// Stroke weight in pixels
    pub weight: u32,
    /// Fill opacity in [0, 1]
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Standard circle-marker style for a tier
    pub fn for_tier(tier: SeverityTier) -> Self {
        Self {
            tier,
            color: tier.color(),
            radius_px: 3,
            weight: 1,
            fill_opacity: 0.8,
        }
    }
}

/// A transient in-app message that dismisses itself
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Optional bold heading
    pub title: Option<String>,
    /// Message body; lines separated by `\n`
    pub body: String,
    /// How long the message stays visible
    pub duration: Duration,
}

impl Toast {
    /// Create a toast without a heading
    pub fn new(body: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: None,
            body: body.into(),
            duration,
        }
    }

    /// Create a toast with a heading
    pub fn titled(title: impl Into<String>, body: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
            duration,
        }
    }

    /// Heading and body as a single string
    pub fn text(&self) -> String {
        match &self.title {
            Some(title) => format!("{}\n{}", title, self.body),
            None => self.body.clone(),
        }
    }
}

/// A hazard marker placed on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Visual style
    pub style: MarkerStyle,
    /// Popup text shown when the marker is opened
    pub popup: String,
    /// Toast raised when the marker is clicked
    pub click_toast: Toast,
}

/// Handle of a circle drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircleId(pub u64);

/// An outline circle drawn around a location
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Circle center
    pub center: UserLocation,
    /// Radius in metres
    pub radius_m: f64,
    /// Stroke color (CSS hex)
    pub color: &'static str,
    /// Whether the circle is filled
    pub fill: bool,
}

/// An OS/browser-level notification
///
/// Notifications sharing a `tag` replace each other instead of stacking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformNotification {
    /// Notification title
    pub title: String,
    /// Notification body
    pub body: String,
    /// Replacement tag
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_style_for_tier() {
        let style = MarkerStyle::for_tier(SeverityTier::High);
        assert_eq!(style.color, "#ff0000");
        assert_eq!(style.radius_px, 3);
        assert_eq!(style.weight, 1);
    }

    #[test]
    fn test_toast_text() {
        let plain = Toast::new("hello", Duration::from_secs(1));
        assert_eq!(plain.text(), "hello");

        let titled = Toast::titled("Fire", "A", Duration::from_secs(1));
        assert_eq!(titled.text(), "Fire\nA");
    }
}
