//! Error types for feed operations

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running the alert feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The stream could not be established
    #[error("Connect error: {0}")]
    Connect(String),

    /// The handshake did not finish in time
    #[error("Connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// No frame arrived within the idle timeout
    #[error("No traffic for {0:?}; stream considered stale")]
    IdleTimeout(Duration),

    /// The established stream failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// No Tokio runtime to run the connector on
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for FeedError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        FeedError::Transport(e.to_string())
    }
}
