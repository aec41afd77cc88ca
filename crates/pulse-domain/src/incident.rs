//! Incident module - the record delivered by the live alert feed

use crate::Severity;

/// A detected event reported by the edge server
///
/// Incidents have no identity field. Two records with identical fields are
/// still two separate arrivals.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    /// Human-readable description (e.g. "Fire Detected")
    pub event: String,

    /// Detection confidence in [0.0, 1.0]
    pub confidence: f64,

    /// Display timestamp as sent by the server (e.g. "12:01")
    pub timestamp: String,

    /// Urgency classification
    pub severity: Severity,
}

impl Incident {
    /// Create a new incident
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_domain::{Incident, Severity};
    ///
    /// let incident = Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical);
    /// assert!(incident.is_critical());
    /// ```
    pub fn new(
        event: impl Into<String>,
        confidence: f64,
        timestamp: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            event: event.into(),
            confidence,
            timestamp: timestamp.into(),
            severity,
        }
    }

    /// Whether the incident is critical
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    /// Confidence as a whole percentage, for display
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
