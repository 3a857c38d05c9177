//! Session state shared by the alerting components
//!
//! A single owned value, held by the [`AlertController`](crate::AlertController)
//! and lent to the components that need it. The repeating proximity
//! schedule is not stored here; it belongs to the
//! [`ProximityMonitor`](crate::ProximityMonitor).

use firewatch_domain::{RadiusKm, UserLocation};

/// Alerting state, derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// Alerts not enabled (permission not granted or not requested)
    Disabled,
    /// Alerts enabled but no position known; checks are no-ops
    EnabledNoLocation,
    /// Alerts enabled with a known position; repeating checks active
    EnabledMonitoring,
}

/// Mutable state of one user session
#[derive(Debug, Clone)]
pub struct SessionState {
    location: Option<UserLocation>,
    radius: RadiusKm,
    alerts_enabled: bool,
}

impl SessionState {
    /// Start a session with the given radius selection
    pub fn new(radius: RadiusKm) -> Self {
        Self {
            location: None,
            radius,
            alerts_enabled: false,
        }
    }

    /// Last acquired position
    pub fn location(&self) -> Option<UserLocation> {
        self.location
    }

    /// Replace the position; there is no way to clear it
    pub fn set_location(&mut self, location: UserLocation) {
        self.location = Some(location);
    }

    /// Currently selected radius
    pub fn radius(&self) -> RadiusKm {
        self.radius
    }

    /// Change the selected radius
    pub fn set_radius(&mut self, radius: RadiusKm) {
        self.radius = radius;
    }

    /// Whether the user opted in to alerts
    pub fn alerts_enabled(&self) -> bool {
        self.alerts_enabled
    }

    /// Opt in to alerts. One-way: nothing turns alerts back off.
    pub fn enable_alerts(&mut self) {
        self.alerts_enabled = true;
    }

    /// Current alerting state
    pub fn alert_state(&self) -> AlertState {
        match (self.alerts_enabled, self.location.is_some()) {
            (false, _) => AlertState::Disabled,
            (true, false) => AlertState::EnabledNoLocation,
            (true, true) => AlertState::EnabledMonitoring,
        }
    }

    /// Whether the repeating proximity schedule should be running
    pub fn should_monitor(&self) -> bool {
        self.alert_state() == AlertState::EnabledMonitoring
    }
}
