//! Pulse Alert Feed
//!
//! Live subscription to the edge server's incident stream.
//!
//! # Overview
//!
//! The feed connector is responsible for:
//! - **Delivery**: decoding each stream message into an [`Incident`] and
//!   handing it to a registered sink, in arrival order
//! - **Validation**: dropping and logging malformed messages instead of
//!   forwarding them
//! - **Reconnection**: re-establishing a dropped stream with capped
//!   exponential backoff
//! - **Staleness detection**: pinging an open connection and treating it as
//!   dead when nothing, not even a pong, arrives within the idle timeout
//! - **Backpressure**: a bounded queue between the socket and the sink that
//!   discards the oldest buffered incidents when the sink falls behind
//! - **State reporting**: `Connecting`, `Open`, `Closed`, `Error` so a display
//!   can flag a degraded feed
//!
//! # Usage
//!
//! ```no_run
//! use pulse_domain::Incident;
//! use pulse_feed::{FeedConfig, FeedConnector};
//! use pulse_sdk::Endpoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::parse("http://edge.local:8000")?;
//!     let connector = FeedConnector::for_endpoint(&endpoint, FeedConfig::default());
//!
//!     let handle = connector.connect(|incident: Incident| {
//!         println!("{} ({})", incident.event, incident.severity);
//!     })?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The connector can be configured via TOML:
//!
//! ```toml
//! [feed]
//! initial_backoff_ms = 1000
//! max_backoff_ms = 30000
//! backoff_factor = 2.0
//! idle_timeout_ms = 60000
//! connect_timeout_ms = 10000
//! queue_capacity = 256
//! ```
//!
//! [`Incident`]: pulse_domain::Incident

#![warn(missing_docs)]

mod backoff;
mod config;
mod connector;
mod error;
mod metrics;
mod state;
mod worker;

pub use backoff::Backoff;
pub use config::{FeedConfig, MAX_BACKOFF_FACTOR};
pub use connector::{FeedConnector, FeedHandle};
pub use error::FeedError;
pub use metrics::FeedMetrics;
pub use state::ConnectionState;
