//! Fixed-capacity, newest-first incident ring

use crate::rows::Rows;
use pulse_domain::{Incident, IncidentSink, Severity};
use std::collections::VecDeque;

/// Default number of incidents retained
pub const DEFAULT_CAPACITY: usize = 200;

/// Per-severity tally over the retained window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    /// Critical incidents
    pub critical: usize,
    /// Warning incidents
    pub warning: usize,
    /// Info incidents
    pub info: usize,
    /// Incidents with an unknown severity tag
    pub unclassified: usize,
}

impl SeverityCounts {
    /// Sum across severities
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info + self.unclassified
    }
}

/// Most recent incidents, newest first
///
/// Holds at most `capacity` records; appending beyond that evicts the oldest.
#[derive(Debug, Clone)]
pub struct IncidentStore {
    incidents: VecDeque<Incident>,
    capacity: usize,
    total_appended: u64,
    evicted: u64,
}

impl IncidentStore {
    /// Create a store retaining at most `capacity` incidents
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            incidents: VecDeque::with_capacity(capacity),
            capacity,
            total_appended: 0,
            evicted: 0,
        }
    }

    /// Insert an incident at the head, evicting the oldest past capacity
    pub fn append(&mut self, incident: Incident) {
        self.incidents.push_front(incident);
        self.total_appended += 1;

        while self.incidents.len() > self.capacity {
            if let Some(oldest) = self.incidents.pop_back() {
                self.evicted += 1;
                tracing::trace!(event = %oldest.event, "evicted oldest incident");
            }
        }
    }

    /// Lazy view rows; placeholders when empty
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(&self.incidents)
    }

    /// Retained incidents, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.iter()
    }

    /// Most recent incident
    pub fn latest(&self) -> Option<&Incident> {
        self.incidents.front()
    }

    /// Number of retained incidents
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether no incidents are retained
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Maximum number of retained incidents
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Every append since creation, evicted ones included
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    /// Incidents dropped to stay within capacity
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Drop all retained incidents. Counters are kept.
    pub fn clear(&mut self) {
        self.incidents.clear();
    }

    /// Tally retained incidents by severity
    pub fn severity_counts(&self) -> SeverityCounts {
        self.incidents
            .iter()
            .fold(SeverityCounts::default(), |mut counts, incident| {
                match incident.severity {
                    Severity::Critical => counts.critical += 1,
                    Severity::Warning => counts.warning += 1,
                    Severity::Info => counts.info += 1,
                    Severity::Unclassified(_) => counts.unclassified += 1,
                }
                counts
            })
    }
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl IncidentSink for IncidentStore {
    fn accept(&mut self, incident: Incident) {
        self.append(incident);
    }
}

impl Extend<Incident> for IncidentStore {
    fn extend<T: IntoIterator<Item = Incident>>(&mut self, iter: T) {
        for incident in iter {
            self.append(incident);
        }
    }
}
