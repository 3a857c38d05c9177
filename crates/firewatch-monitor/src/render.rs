//! Marker rendering
//!
//! The layer is always replaced wholesale: clear, then one marker per
//! point. Markers are never diffed or reused, so a point that disappears
//! from the feed disappears from the map on the next render.

use crate::source::FetchTicket;
use firewatch_domain::traits::MarkerLayer;
use firewatch_domain::{ConfidenceThresholds, HazardPoint, Marker, MarkerStyle, Toast};
use std::time::Duration;

/// What happened to a fetch result handed to the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Markers replaced; holds the new marker count
    Rendered(usize),
    /// A newer result was already rendered; nothing changed
    Stale,
}

/// Owns the hazard markers on the map
pub struct RenderLayer<L> {
    layer: L,
    thresholds: ConfidenceThresholds,
    click_toast: Duration,
    last_rendered: Option<FetchTicket>,
}

impl<L: MarkerLayer> RenderLayer<L> {
    /// Create a render layer drawing into `layer`
    pub fn new(layer: L, thresholds: ConfidenceThresholds, click_toast: Duration) -> Self {
        Self {
            layer,
            thresholds,
            click_toast,
            last_rendered: None,
        }
    }

    /// Render the result of fetch `ticket` unless a newer one was already shown
    pub fn apply(&mut self, ticket: FetchTicket, points: &[HazardPoint]) -> RenderOutcome {
        if self.last_rendered.is_some_and(|last| ticket <= last) {
            tracing::debug!(
                ticket = ticket.value(),
                "Dropping out-of-order hazard response"
            );
            return RenderOutcome::Stale;
        }

        self.last_rendered = Some(ticket);
        RenderOutcome::Rendered(self.render(points))
    }

    /// Replace every marker with one per point; returns the marker count
    pub fn render(&mut self, points: &[HazardPoint]) -> usize {
        self.layer.clear();
        for point in points {
            let marker = self.marker_for(point);
            self.layer.add(marker);
        }
        self.layer.len()
    }

    /// Build the marker for one point
    pub fn marker_for(&self, point: &HazardPoint) -> Marker {
        let tier = point.severity(&self.thresholds);
        let confidence = point.confidence_label();

        let popup = format!(
            "{}\nSource: {}\nDate: {}\nConfidence: {}\nLat, Lon: {:.4}, {:.4}",
            point.title,
            point.source,
            point.observed_at,
            confidence,
            point.latitude,
            point.longitude
        );
        let click_toast = Toast::titled(
            "Fire",
            format!(
                "{}\n{}\nConfidence: {}",
                point.title, point.observed_at, confidence
            ),
            self.click_toast,
        );

        Marker {
            latitude: point.latitude,
            longitude: point.longitude,
            style: MarkerStyle::for_tier(tier),
            popup,
            click_toast,
        }
    }

    /// The underlying marker layer
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// Ticket of the most recently rendered fetch
    pub fn last_rendered(&self) -> Option<FetchTicket> {
        self.last_rendered
    }
}
