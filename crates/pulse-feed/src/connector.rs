//! Public entry points: [`FeedConnector`] and the [`FeedHandle`] it returns

use crate::metrics::{FeedCounters, FeedMetrics};
use crate::worker::{DispatchTask, SocketTask};
use crate::{ConnectionState, FeedConfig, FeedError};
use pulse_domain::IncidentSink;
use pulse_sdk::Endpoint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Explicitly constructed connector for one alert stream
///
/// Nothing is opened until [`connect`](FeedConnector::connect) is called.
#[derive(Debug, Clone)]
pub struct FeedConnector {
    url: String,
    config: FeedConfig,
}

impl FeedConnector {
    /// Create a connector for a WebSocket URL
    pub fn new(url: impl Into<String>, config: FeedConfig) -> Self {
        Self {
            url: url.into(),
            config,
        }
    }

    /// Create a connector for the alert stream of an edge server
    pub fn for_endpoint(endpoint: &Endpoint, config: FeedConfig) -> Self {
        Self::new(endpoint.alerts_url(), config)
    }

    /// Stream URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connector configuration
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Open the stream and deliver every decoded incident to `sink`
    ///
    /// The sink is called from a single task, one incident at a time, in
    /// arrival order. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no runtime is
    /// available. Transport failures are not errors here: they are reported
    /// through [`FeedHandle::state`] and retried.
    pub fn connect<S>(&self, sink: S) -> Result<FeedHandle, FeedError>
    where
        S: IncidentSink + Send + 'static,
    {
        self.config.validate()?;

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| FeedError::Runtime(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let (queue_tx, queue_rx) = broadcast::channel(self.config.queue_capacity);
        let counters = Arc::new(FeedCounters::default());

        let socket = SocketTask {
            url: self.url.clone(),
            config: self.config.clone(),
            queue: queue_tx,
            state: state_tx,
            counters: Arc::clone(&counters),
            shutdown: shutdown_rx.clone(),
        };

        let dispatch = DispatchTask {
            queue: queue_rx,
            sink,
            counters: Arc::clone(&counters),
            shutdown: shutdown_rx,
        };

        let tasks = vec![runtime.spawn(socket.run()), runtime.spawn(dispatch.run())];

        Ok(FeedHandle {
            url: self.url.clone(),
            shutdown: shutdown_tx,
            state: state_rx,
            counters,
            closed: AtomicBool::new(false),
            tasks,
        })
    }
}

/// Live subscription returned by [`FeedConnector::connect`]
///
/// Closing is idempotent. Dropping the handle closes it.
#[derive(Debug)]
pub struct FeedHandle {
    url: String,
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<ConnectionState>,
    counters: Arc<FeedCounters>,
    closed: AtomicBool,
    tasks: Vec<JoinHandle<()>>,
}

impl FeedHandle {
    /// Release the connection. Calls after the first have no effect.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(url = %self.url, "closing alert feed");
        self.shutdown.send_replace(true);
    }

    /// Close and wait for the background tasks to finish
    pub async fn shutdown(mut self) {
        self.close();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "alert feed task failed");
            }
        }
    }

    /// Whether [`close`](FeedHandle::close) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Snapshot of the connector's counters
    pub fn metrics(&self) -> FeedMetrics {
        self.counters.snapshot()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::Incident;

    #[test]
    fn test_for_endpoint_uses_alerts_url() {
        let endpoint = Endpoint::parse("http://edge:8000").unwrap();
        let connector = FeedConnector::for_endpoint(&endpoint, FeedConfig::default());
        assert_eq!(connector.url(), "ws://edge:8000/ws/alerts");
    }

    #[test]
    fn test_connect_outside_runtime_fails() {
        let connector = FeedConnector::new("ws://127.0.0.1:1/ws/alerts", FeedConfig::default());
        let result = connector.connect(|_incident: Incident| {});
        assert!(matches!(result, Err(FeedError::Runtime(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = FeedConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        let connector = FeedConnector::new("ws://127.0.0.1:1/ws/alerts", config);
        let result = connector.connect(|_incident: Incident| {});
        assert!(matches!(result, Err(FeedError::Config(_))));
    }
}
