//! User position and radius indicator

use crate::error::MonitorError;
use firewatch_domain::traits::{Geolocator, MapView};
use firewatch_domain::{Circle, CircleId, RadiusKm, UserLocation};

/// Outline color of the radius indicator
pub const RADIUS_COLOR: &str = "#0077ff";

/// Acquires the user's position and keeps the radius circle in sync
///
/// At most one radius circle exists at any time: the old one is removed
/// before a new one is drawn.
pub struct LocationTracker<G, V> {
    geolocator: G,
    view: V,
    indicator: Option<CircleId>,
    locate_zoom: u8,
}

impl<G, V> LocationTracker<G, V>
where
    G: Geolocator,
    V: MapView,
{
    /// Create a tracker that recenters at `locate_zoom`
    pub fn new(geolocator: G, view: V, locate_zoom: u8) -> Self {
        Self {
            geolocator,
            view,
            indicator: None,
            locate_zoom,
        }
    }

    /// Acquire the current position once
    ///
    /// On success the map is recentered and the radius circle redrawn. On
    /// failure nothing on the map changes.
    pub async fn acquire(&mut self, radius: RadiusKm) -> Result<UserLocation, MonitorError> {
        let location = self
            .geolocator
            .current_position()
            .await
            .map_err(|e| MonitorError::Location(e.to_string()))?;

        tracing::info!(%location, "Location acquired");
        self.view.set_view(location, self.locate_zoom);
        self.draw_indicator(location, radius);
        Ok(location)
    }

    /// Show the overview before any position is known
    pub fn show_overview(&mut self, center: UserLocation, zoom: u8) {
        tracing::debug!(%center, zoom, "Showing map overview");
        self.view.set_view(center, zoom);
    }

    /// Redraw the circle for a new radius at the known location
    ///
    /// Returns `false` (and draws nothing) when no location is known.
    pub fn redraw_radius(&mut self, location: Option<UserLocation>, radius: RadiusKm) -> bool {
        match location {
            Some(location) => {
                self.draw_indicator(location, radius);
                true
            }
            None => false,
        }
    }

    fn draw_indicator(&mut self, center: UserLocation, radius: RadiusKm) {
        if let Some(old) = self.indicator.take() {
            self.view.remove_circle(old);
        }
        let id = self.view.add_circle(Circle {
            center,
            radius_m: radius.meters(),
            color: RADIUS_COLOR,
            fill: false,
        });
        self.indicator = Some(id);
    }

    /// Handle of the current radius circle
    pub fn indicator(&self) -> Option<CircleId> {
        self.indicator
    }

    /// The map view
    pub fn view(&self) -> &V {
        &self.view
    }
}
