//! Error types for backend calls.

use thiserror::Error;

/// Backend client errors
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Connection error (network, DNS, refused, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Base URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Anything else
    #[error("Client error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            ClientError::Other(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON parsing error: {}", e))
    }
}

