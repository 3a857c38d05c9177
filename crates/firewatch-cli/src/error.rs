//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] firewatch_monitor::ConfigError),

    /// Monitor error
    #[error(transparent)]
    Monitor(#[from] firewatch_monitor::MonitorError),

    /// Backend error
    #[error("Backend error: {0}")]
    Client(#[from] firewatch_client::ClientError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
