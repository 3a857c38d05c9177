//! Firewatch Backend Client
//!
//! Implementations of the `HazardApi` trait from `firewatch-domain`.
//!
//! # Providers
//!
//! - [`HttpHazardApi`]: talks to the hazard backend over HTTP
//! - [`MockHazardApi`]: scripted, in-memory backend for tests
//!
//! # Backend endpoints
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `GET /api/fires` | JSON array of hazards |
//! | `GET /api/nearby?lat=&lon=&radius_km=` | Hazards with `distance_km`, nearest first |
//!
//! # Examples
//!
//! ```no_run
//! use firewatch_client::HttpHazardApi;
//! use firewatch_domain::traits::HazardApi;
//!
//! # async fn demo() -> Result<(), firewatch_client::ClientError> {
//! let api = HttpHazardApi::new("http://127.0.0.1:5000")?;
//! let points = api.fetch_points().await?;
//! println!("{} hazards", points.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod http;
mod mock;
pub mod wire;

pub use error::ClientError;
pub use http::HttpHazardApi;
pub use mock::MockHazardApi;
