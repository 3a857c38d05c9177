//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the alerting core and the
//! platform it runs on: the hazard backend, geolocation, the map, the
//! in-app message area and platform notifications. Implementations live in
//! other crates (HTTP client, terminal host, test fakes).

use crate::{
    Circle, CircleId, HazardPoint, Marker, NearbyResult, PlatformNotification, RadiusKm, Toast,
    UserLocation,
};
use std::fmt::Display;
use std::future::Future;

/// Backend serving hazard detections
///
/// Implemented by the infrastructure layer (firewatch-client)
pub trait HazardApi: Send + Sync {
    /// Error type for backend calls
    type Error: Display + Send + 'static;

    /// Retrieve the current set of hazard points
    fn fetch_points(&self) -> impl Future<Output = Result<Vec<HazardPoint>, Self::Error>> + Send;

    /// Retrieve hazards within `radius` of `location`, nearest first
    fn fetch_nearby(
        &self,
        location: UserLocation,
        radius: RadiusKm,
    ) -> impl Future<Output = Result<Vec<NearbyResult>, Self::Error>> + Send;
}

/// On-demand position retrieval
pub trait Geolocator: Send + Sync {
    /// Error type for position requests
    type Error: Display + Send;

    /// Acquire the current position once
    fn current_position(&self) -> impl Future<Output = Result<UserLocation, Self::Error>> + Send;
}

/// Platform notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Not requested yet
    #[default]
    Default,
    /// Explicitly granted by the user
    Granted,
    /// Refused by the user
    Denied,
    /// The platform has no notification support
    Unsupported,
}

/// Permission-gated platform notifications
pub trait PlatformNotifier: Send {
    /// Error type for delivery failures
    type Error: Display;

    /// Current permission, without prompting
    fn permission(&self) -> Permission;

    /// Prompt the user for permission
    fn request_permission(&mut self) -> impl Future<Output = Permission> + Send;

    /// Deliver a notification, replacing any previous one with the same tag
    fn show(&mut self, notification: &PlatformNotification) -> Result<(), Self::Error>;
}

/// Layer holding hazard markers
pub trait MarkerLayer: Send {
    /// Remove every marker
    fn clear(&mut self);

    /// Add one marker
    fn add(&mut self, marker: Marker);

    /// Number of markers currently shown
    fn len(&self) -> usize;

    /// Whether the layer is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map viewport and overlay shapes
pub trait MapView: Send {
    /// Center the map on `center` at `zoom`
    fn set_view(&mut self, center: UserLocation, zoom: u8);

    /// Draw a circle and return its handle
    fn add_circle(&mut self, circle: Circle) -> CircleId;

    /// Remove a previously drawn circle
    fn remove_circle(&mut self, id: CircleId);
}

/// In-app message area
pub trait MessageSurface: Send {
    /// Show a transient, self-dismissing message
    fn toast(&mut self, toast: Toast);

    /// Show a blocking notice the user must acknowledge
    fn notice(&mut self, message: &str);
}
