//! Firewatch Domain Layer
//!
//! Value types and trait seams shared by every other Firewatch crate.
//! The only external dependency is `chrono`, used to parse observation
//! timestamps; everything else is plain data and pure functions.
//!
//! ## Key Concepts
//!
//! - **Hazard point**: a detected event with location, confidence and metadata
//! - **Severity tier**: High / Normal / Low, derived from confidence via fixed thresholds
//! - **User location**: the position acquired on explicit user request
//! - **Radius**: the alerting catchment around the user, always > 0 km
//! - **Nearby result**: a hazard plus its distance from the user
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - External collaborators (backend API, geolocation, map, notifications)
//!   are described as traits in [`traits`]; implementations live elsewhere

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod hazard;
pub mod location;
pub mod severity;
pub mod traits;
pub mod view;

// Re-exports for convenience
pub use confidence::{classify, ConfidenceThresholds, DEFAULT_CONFIDENCE};
pub use hazard::{HazardPoint, NearbyResult, ObservedAt};
pub use location::{RadiusKm, UserLocation};
pub use severity::SeverityTier;
pub use traits::Permission;
pub use view::{Circle, CircleId, Marker, MarkerStyle, PlatformNotification, Toast};
