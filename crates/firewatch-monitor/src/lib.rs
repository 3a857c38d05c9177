//! Firewatch Monitor
//!
//! Hazard rendering and proximity alerting, independent of any particular
//! UI toolkit.
//!
//! # Overview
//!
//! Two schedules run side by side:
//! - **Hazard polling**: [`HazardPoller`] fetches every detection on a fixed
//!   interval and redraws the marker layer. Responses that arrive out of
//!   order are dropped instead of overwriting newer markers.
//! - **Proximity alerts**: [`AlertController`] reacts to user commands
//!   (center on me, change radius, enable alerts) and runs nearby checks on
//!   its own repeating schedule once alerts are on and a position is known.
//!
//! ## Alert states
//!
//! | State | Alerts enabled | Location known | Repeating checks |
//! |-------|----------------|----------------|------------------|
//! | **Disabled** | no | either | no |
//! | **EnabledNoLocation** | yes | no | no (checks are no-ops) |
//! | **EnabledMonitoring** | yes | yes | yes |
//!
//! There is no transition back to `Disabled`.
//!
//! # Usage
//!
//! ```no_run
//! use firewatch_client::HttpHazardApi;
//! use firewatch_monitor::{AlertController, Command, MonitorConfig};
//! # use firewatch_domain::traits::*;
//! # use firewatch_domain::*;
//! # struct Gps; struct Map; struct Screen; struct Os;
//! # impl Geolocator for Gps {
//! #     type Error = String;
//! #     async fn current_position(&self) -> Result<UserLocation, String> {
//! #         UserLocation::new(0.0, 0.0)
//! #     }
//! # }
//! # impl MapView for Map {
//! #     fn set_view(&mut self, _: UserLocation, _: u8) {}
//! #     fn add_circle(&mut self, _: Circle) -> CircleId { CircleId(0) }
//! #     fn remove_circle(&mut self, _: CircleId) {}
//! # }
//! # impl MessageSurface for Screen {
//! #     fn toast(&mut self, _: Toast) {}
//! #     fn notice(&mut self, _: &str) {}
//! # }
//! # impl PlatformNotifier for Os {
//! #     type Error = String;
//! #     fn permission(&self) -> Permission { Permission::Granted }
//! #     async fn request_permission(&mut self) -> Permission { Permission::Granted }
//! #     fn show(&mut self, _: &PlatformNotification) -> Result<(), String> { Ok(()) }
//! # }
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::default();
//!     let api = Arc::new(HttpHazardApi::new(&config.api_base_url)?);
//!     let mut controller = AlertController::new(&config, api, Gps, Map, Screen, Os)?;
//!
//!     let commands = controller.sender();
//!     commands.send(Command::EnableAlerts)?;
//!     commands.send(Command::AcquireLocation)?;
//!
//!     // Run until Ctrl+C
//!     controller.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! See [`MonitorConfig`]. Every field has a default, so an empty TOML file
//! is valid.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod poller;
pub mod proximity;
pub mod render;
pub mod session;
pub mod source;
pub mod tiles;
pub mod timer;
pub mod tracker;

pub use config::{ConfigError, MonitorConfig};
pub use controller::{AlertController, Command, Flow};
pub use error::{MonitorError, Result};
pub use gateway::NotificationGateway;
pub use metrics::{AlertMetrics, PollMetrics};
pub use poller::HazardPoller;
pub use proximity::{CheckOutcome, ProximityMonitor};
pub use render::{RenderLayer, RenderOutcome};
pub use session::{AlertState, SessionState};
pub use source::{FetchReply, FetchTicket, PointSource};
pub use tiles::TileSource;
pub use timer::ProximityTimer;
pub use tracker::LocationTracker;
