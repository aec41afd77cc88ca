//! Connection state reported by the feed connector

use std::fmt;

/// Lifecycle of the alert stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in progress
    Connecting,
    /// Stream established and delivering
    Open,
    /// Connector stopped; no further attempts
    Closed,
    /// Last attempt failed; a reconnect may follow
    Error(String),
}

impl ConnectionState {
    /// Whether incidents are currently flowing
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    /// Whether the display should flag the feed as degraded
    pub fn is_degraded(&self) -> bool {
        !self.is_open()
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Error(_) => "error",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Error(reason) => write!(f, "error: {}", reason),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_open_is_healthy() {
        assert!(ConnectionState::Open.is_open());
        assert!(ConnectionState::Connecting.is_degraded());
        assert!(ConnectionState::Closed.is_degraded());
        assert!(ConnectionState::Error("refused".into()).is_degraded());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConnectionState::Open.to_string(), "open");
        assert_eq!(
            ConnectionState::Error("connection refused".into()).to_string(),
            "error: connection refused"
        );
    }
}
