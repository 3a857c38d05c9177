//! Command implementations.

pub mod nearby;
pub mod once;
pub mod watch;

pub use self::nearby::execute_nearby;
pub use self::once::execute_once;
pub use self::watch::execute_watch;

use crate::error::Result;
use firewatch_client::HttpHazardApi;
use firewatch_monitor::MonitorConfig;

/// Build the backend client from configuration.
pub fn build_api(config: &MonitorConfig) -> Result<HttpHazardApi> {
    let api = match config.request_timeout() {
        Some(timeout) => HttpHazardApi::with_timeout(&config.api_base_url, timeout)?,
        None => HttpHazardApi::new(&config.api_base_url)?,
    };
    Ok(api)
}
