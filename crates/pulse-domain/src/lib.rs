//! Pulse Domain Layer
//!
//! Core model shared by every Pulse crate. It has no external dependencies:
//! wire formats, transport and rendering live in the crates built on top.
//!
//! ## Key Concepts
//!
//! - **Incident**: a single detected event (fire, fall, intrusion, ...) with a
//!   severity, a confidence score and a display timestamp
//! - **Severity**: urgency (critical, warning, info), with unknown tags kept
//!   as unclassified
//! - **Analytics snapshot**: aggregate counters served by the edge server
//! - **Camera**: a stream source and its reported status
//!
//! Incidents carry no identity. Every delivered record is purely additive:
//! it can be displayed and counted, never updated or de-duplicated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod camera;
pub mod incident;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use analytics::AnalyticsSnapshot;
pub use camera::{Camera, CameraStatus};
pub use incident::Incident;
pub use severity::{Affordance, Severity};
pub use traits::IncidentSink;
