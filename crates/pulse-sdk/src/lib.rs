//! Pulse Rust SDK
//!
//! Client library for the Pulse edge server: endpoint resolution, the REST
//! snapshot resources and the validating wire decoders shared with the live
//! alert feed.
//!
//! # Example
//!
//! ```no_run
//! use pulse_sdk::{Endpoint, PulseClient};
//!
//! # async fn demo() -> Result<(), pulse_sdk::SdkError> {
//! let endpoint = Endpoint::parse("http://edge.local:8000")?;
//! let client = PulseClient::new(endpoint)?;
//!
//! let analytics = client.get_analytics().await?;
//! println!("critical: {}", analytics.critical);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod endpoint;
mod error;
pub mod wire;

pub use client::{PulseClient, DEFAULT_TIMEOUT_SECS};
pub use endpoint::{Endpoint, Scheme, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{DecodeError, SdkError};
