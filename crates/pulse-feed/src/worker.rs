//! Socket and dispatch tasks behind a [`FeedHandle`](crate::FeedHandle).
//!
//! The socket task owns the WebSocket: it connects, decodes frames into the
//! bounded queue and reconnects with backoff. The dispatch task drains the
//! queue into the sink, so a slow sink never stalls the socket.

use crate::metrics::FeedCounters;
use crate::{Backoff, ConnectionState, FeedConfig, FeedError};
use futures_util::{SinkExt, StreamExt};
use pulse_domain::{Incident, IncidentSink};
use pulse_sdk::wire;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;

/// How a session ended without a transport error
#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    /// The handle was closed
    Shutdown,
    /// The server ended the stream
    ServerClosed,
}

pub(crate) struct SocketTask {
    pub(crate) url: String,
    pub(crate) config: FeedConfig,
    pub(crate) queue: broadcast::Sender<Incident>,
    pub(crate) state: watch::Sender<ConnectionState>,
    pub(crate) counters: Arc<FeedCounters>,
    pub(crate) shutdown: watch::Receiver<bool>,
}

impl SocketTask {
    pub(crate) async fn run(mut self) {
        let mut backoff = Backoff::from_config(&self.config);

        tracing::info!(url = %self.url, "alert feed started");

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            self.state.send_replace(ConnectionState::Connecting);
            FeedCounters::bump(&self.counters.connection_attempts);

            match self.session(&mut backoff).await {
                Ok(SessionEnd::Shutdown) => break,
                Ok(SessionEnd::ServerClosed) => {
                    tracing::warn!(url = %self.url, "alert stream closed by server");
                    self.state.send_replace(ConnectionState::Error(
                        "stream closed by server".to_string(),
                    ));
                }
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "alert stream failed");
                    self.state.send_replace(ConnectionState::Error(e.to_string()));
                }
            }

            if let Some(max) = self.config.max_reconnect_attempts {
                if backoff.attempts() >= max {
                    tracing::error!(
                        url = %self.url,
                        attempts = backoff.attempts(),
                        "giving up on alert stream"
                    );
                    break;
                }
            }

            let delay = backoff.next_delay();
            tracing::info!(?delay, attempt = backoff.attempts(), "reconnecting alert stream");

            tokio::select! {
                biased;
                _ = self.shutdown.changed() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.state.send_replace(ConnectionState::Closed);
        tracing::info!(url = %self.url, "alert feed stopped");
    }

    /// One connection: handshake, then read until it ends
    async fn session(&mut self, backoff: &mut Backoff) -> Result<SessionEnd, FeedError> {
        let connect_timeout = self.config.connect_timeout();

        let handshake = tokio::select! {
            biased;
            _ = self.shutdown.changed() => return Ok(SessionEnd::Shutdown),
            result = tokio::time::timeout(
                connect_timeout,
                tokio_tungstenite::connect_async(self.url.as_str()),
            ) => result,
        };

        let (mut stream, _response) = handshake
            .map_err(|_| FeedError::ConnectTimeout(connect_timeout))?
            .map_err(|e| FeedError::Connect(e.to_string()))?;

        FeedCounters::bump(&self.counters.connections_opened);
        self.state.send_replace(ConnectionState::Open);
        backoff.reset();
        tracing::info!(url = %self.url, "alert stream open");

        let idle_timeout = self.config.idle_timeout();
        let mut keepalive = idle_timeout.map(keepalive_interval);
        let mut last_seen = Instant::now();

        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.changed() => {
                    if let Err(e) = stream.close(None).await {
                        tracing::debug!(error = %e, "close handshake failed");
                    }
                    return Ok(SessionEnd::Shutdown);
                }
                _ = keepalive_tick(&mut keepalive) => {
                    if let Some(limit) = idle_timeout {
                        if last_seen.elapsed() >= limit {
                            return Err(FeedError::IdleTimeout(limit));
                        }
                    }
                    stream.send(Message::Ping(Vec::new())).await?;
                    tracing::trace!("keepalive ping sent");
                    continue;
                }
                next = stream.next() => next,
            };

            let Some(frame) = next else {
                return Ok(SessionEnd::ServerClosed);
            };
            let frame = frame?;
            last_seen = Instant::now();

            match frame {
                Message::Text(text) => self.ingest(&text),
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => self.ingest(text),
                    Err(e) => {
                        FeedCounters::bump(&self.counters.messages_received);
                        FeedCounters::bump(&self.counters.malformed_dropped);
                        tracing::warn!(error = %e, "dropping non UTF-8 binary frame");
                    }
                },
                Message::Close(frame) => {
                    tracing::debug!(?frame, "close frame received");
                    return Ok(SessionEnd::ServerClosed);
                }
                // Liveness only; incoming pings are answered by the protocol layer.
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
    }

    /// Decode one message and queue it, or drop it
    fn ingest(&self, text: &str) {
        FeedCounters::bump(&self.counters.messages_received);

        match wire::decode_incident(text) {
            Ok(incident) => {
                tracing::debug!(event = %incident.event, severity = %incident.severity, "incident received");
                if self.queue.send(incident).is_err() {
                    tracing::trace!("no dispatcher attached; incident discarded");
                }
            }
            Err(e) => {
                FeedCounters::bump(&self.counters.malformed_dropped);
                tracing::warn!(error = %e, "dropping malformed alert message");
            }
        }
    }
}

/// Ping schedule for an open stream
///
/// Pings go out every half idle timeout. A stream that answers nothing, not
/// even a pong, for a full idle timeout is stale; that is noticed at most
/// half a timeout late.
fn keepalive_interval(idle_timeout: Duration) -> Interval {
    let period = (idle_timeout / 2).max(Duration::from_millis(1));
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Next keepalive tick; never fires when staleness detection is off
async fn keepalive_tick(keepalive: &mut Option<Interval>) {
    match keepalive {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

pub(crate) struct DispatchTask<S> {
    pub(crate) queue: broadcast::Receiver<Incident>,
    pub(crate) sink: S,
    pub(crate) counters: Arc<FeedCounters>,
    pub(crate) shutdown: watch::Receiver<bool>,
}

impl<S> DispatchTask<S>
where
    S: IncidentSink + Send + 'static,
{
    pub(crate) async fn run(mut self) {
        loop {
            let received = tokio::select! {
                biased;
                _ = self.shutdown.changed() => break,
                received = self.queue.recv() => received,
            };

            match received {
                Ok(incident) => {
                    self.sink.accept(incident);
                    FeedCounters::bump(&self.counters.incidents_delivered);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    FeedCounters::add(&self.counters.backpressure_dropped, skipped);
                    tracing::warn!(skipped, "consumer fell behind; oldest buffered incidents dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        tracing::debug!("alert dispatch stopped");
    }
}
