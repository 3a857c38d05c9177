//! Error types for monitor operations

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while monitoring
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Position could not be acquired
    #[error("{0}")]
    Location(String),

    /// Notification permission unavailable
    #[error("Permission error: {0}")]
    Permission(String),

    /// Radius rejected
    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;
