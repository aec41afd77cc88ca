//! Metrics collection for the feed connector

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the socket and dispatch tasks
#[derive(Debug, Default)]
pub(crate) struct FeedCounters {
    pub(crate) messages_received: AtomicU64,
    pub(crate) incidents_delivered: AtomicU64,
    pub(crate) malformed_dropped: AtomicU64,
    pub(crate) backpressure_dropped: AtomicU64,
    pub(crate) connection_attempts: AtomicU64,
    pub(crate) connections_opened: AtomicU64,
}

impl FeedCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> FeedMetrics {
        FeedMetrics {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            incidents_delivered: self.incidents_delivered.load(Ordering::Relaxed),
            malformed_dropped: self.malformed_dropped.load(Ordering::Relaxed),
            backpressure_dropped: self.backpressure_dropped.load(Ordering::Relaxed),
            connection_attempts: self.connection_attempts.load(Ordering::Relaxed),
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the connector's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedMetrics {
    /// Data frames read from the stream
    pub messages_received: u64,
    /// Incidents handed to the sink
    pub incidents_delivered: u64,
    /// Messages that failed to decode
    pub malformed_dropped: u64,
    /// Buffered incidents discarded because the sink fell behind
    pub backpressure_dropped: u64,
    /// Handshakes started
    pub connection_attempts: u64,
    /// Handshakes that reached the open state
    pub connections_opened: u64,
}

impl FeedMetrics {
    /// Reconnects after the first successful connection
    pub fn reconnects(&self) -> u64 {
        self.connections_opened.saturating_sub(1)
    }

    /// Incidents received but never delivered
    pub fn total_dropped(&self) -> u64 {
        self.malformed_dropped + self.backpressure_dropped
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Feed Metrics Summary".to_string(),
            "====================".to_string(),
            format!("Messages received: {}", self.messages_received),
            format!("Incidents delivered: {}", self.incidents_delivered),
            format!("Malformed dropped: {}", self.malformed_dropped),
            format!("Backpressure dropped: {}", self.backpressure_dropped),
            format!(
                "Connections: {} opened / {} attempted",
                self.connections_opened, self.connection_attempts
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let counters = FeedCounters::default();
        FeedCounters::bump(&counters.messages_received);
        FeedCounters::bump(&counters.messages_received);
        FeedCounters::bump(&counters.malformed_dropped);
        FeedCounters::add(&counters.backpressure_dropped, 4);

        let metrics = counters.snapshot();
        assert_eq!(metrics.messages_received, 2);
        assert_eq!(metrics.malformed_dropped, 1);
        assert_eq!(metrics.backpressure_dropped, 4);
        assert_eq!(metrics.total_dropped(), 5);
    }

    #[test]
    fn test_reconnects() {
        let metrics = FeedMetrics {
            connections_opened: 3,
            ..Default::default()
        };
        assert_eq!(metrics.reconnects(), 2);
        assert_eq!(FeedMetrics::default().reconnects(), 0);
    }

    #[test]
    fn test_summary() {
        let metrics = FeedMetrics {
            messages_received: 10,
            incidents_delivered: 8,
            malformed_dropped: 2,
            connection_attempts: 3,
            connections_opened: 2,
            ..Default::default()
        };
        let summary = metrics.summary();
        assert!(summary.contains("Messages received: 10"));
        assert!(summary.contains("Malformed dropped: 2"));
        assert!(summary.contains("2 opened / 3 attempted"));
    }
}
