//! Pulse Incident Store
//!
//! Display-side collection of the most recent incidents.
//!
//! # Overview
//!
//! - **Newest first**: every append lands at the head of the sequence
//! - **Bounded**: a fixed-capacity ring; appending past capacity evicts the
//!   oldest record
//! - **Lazy rows**: [`IncidentStore::rows`] yields view rows on demand and can
//!   be called again to restart; an empty store yields two placeholder rows
//!
//! # Usage
//!
//! ```
//! use pulse_domain::{Incident, Severity};
//! use pulse_store::IncidentStore;
//!
//! let mut store = IncidentStore::default();
//! assert_eq!(store.rows().count(), 2); // placeholders
//!
//! store.append(Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical));
//! store.append(Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning));
//!
//! let events: Vec<_> = store.rows().map(|row| row.event).collect();
//! assert_eq!(events, ["Person Fallen", "Fire Detected"]);
//! ```

#![warn(missing_docs)]

mod rows;
mod store;

pub use rows::{Rows, ViewRow, PLACEHOLDER_ROWS};
pub use store::{IncidentStore, SeverityCounts, DEFAULT_CAPACITY};
