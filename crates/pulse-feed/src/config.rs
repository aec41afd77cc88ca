//! Configuration for the alert feed connector
//!
//! Reconnection backoff, staleness detection and queue bounds.

use crate::FeedError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted `backoff_factor`
pub const MAX_BACKOFF_FACTOR: f64 = 10.0;

/// Configuration for the feed connector
///
/// # Examples
///
/// ```
/// use pulse_feed::FeedConfig;
///
/// let config = FeedConfig::default();
/// assert_eq!(config.initial_backoff_ms, 1_000);
///
/// let config = FeedConfig::aggressive();
/// assert_eq!(config.max_backoff_ms, 5_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Delay before the first reconnect attempt (milliseconds)
    /// Default: 1 second
    pub initial_backoff_ms: u64,

    /// Upper bound on the reconnect delay (milliseconds)
    /// Default: 30 seconds
    pub max_backoff_ms: u64,

    /// Multiplier applied to the delay after each failed attempt
    /// Default: 2.0
    pub backoff_factor: f64,

    /// Consecutive reconnect attempts before giving up; unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reconnect_attempts: Option<u32>,

    /// Silence after which an open stream is considered dead (milliseconds)
    /// 0 disables staleness detection. Default: 60 seconds
    pub idle_timeout_ms: u64,

    /// Time allowed for the WebSocket handshake (milliseconds)
    /// Default: 10 seconds
    pub connect_timeout_ms: u64,

    /// Incidents buffered between the socket and the sink
    /// Default: 256
    pub queue_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
            backoff_factor: 2.0,
            max_reconnect_attempts: None,
            idle_timeout_ms: 60_000,
            connect_timeout_ms: 10_000,
            queue_capacity: 256,
        }
    }
}

impl FeedConfig {
    /// Fast recovery: short delays and a short idle timeout
    ///
    /// Suited to a local edge server on a reliable link.
    pub fn aggressive() -> Self {
        Self {
            initial_backoff_ms: 250,
            max_backoff_ms: 5_000,
            backoff_factor: 2.0,
            max_reconnect_attempts: None,
            idle_timeout_ms: 15_000,
            connect_timeout_ms: 5_000,
            queue_capacity: 256,
        }
    }

    /// Patient recovery: long delays and a long idle timeout
    ///
    /// Suited to metered or flaky links where reconnect storms cost money.
    pub fn lenient() -> Self {
        Self {
            initial_backoff_ms: 5_000,
            max_backoff_ms: 120_000,
            backoff_factor: 2.0,
            max_reconnect_attempts: None,
            idle_timeout_ms: 300_000,
            connect_timeout_ms: 30_000,
            queue_capacity: 1_024,
        }
    }

    /// Reject settings the connector cannot run with
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.queue_capacity == 0 {
            return Err(FeedError::Config("queue_capacity must be at least 1".into()));
        }
        if !(1.0..=MAX_BACKOFF_FACTOR).contains(&self.backoff_factor) {
            return Err(FeedError::Config(format!(
                "backoff_factor must be between 1.0 and {} (got {})",
                MAX_BACKOFF_FACTOR, self.backoff_factor
            )));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(FeedError::Config(format!(
                "initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                self.initial_backoff_ms, self.max_backoff_ms
            )));
        }
        if self.connect_timeout_ms == 0 {
            return Err(FeedError::Config("connect_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    /// Get the initial backoff as Duration
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Get the backoff cap as Duration
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Get the idle timeout, if enabled
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_ms > 0).then(|| Duration::from_millis(self.idle_timeout_ms))
    }

    /// Get the handshake timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
