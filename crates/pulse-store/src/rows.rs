//! View rows produced from the store contents

use pulse_domain::{Incident, Severity};
use std::collections::vec_deque;
use std::iter::FusedIterator;

/// One rendered list row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRow<'a> {
    /// Description
    pub event: &'a str,
    /// Detection confidence
    pub confidence: f64,
    /// Display timestamp
    pub timestamp: &'a str,
    /// Severity
    pub severity: &'a Severity,
    /// True for the fixed rows shown when the store is empty
    pub placeholder: bool,
}

impl<'a> From<&'a Incident> for ViewRow<'a> {
    fn from(incident: &'a Incident) -> Self {
        Self {
            event: &incident.event,
            confidence: incident.confidence,
            timestamp: &incident.timestamp,
            severity: &incident.severity,
            placeholder: false,
        }
    }
}

/// Rows shown in place of an empty store, in display order
pub const PLACEHOLDER_ROWS: [ViewRow<'static>; 2] = [
    ViewRow {
        event: "No incidents detected",
        confidence: 0.0,
        timestamp: "Waiting for live data",
        severity: &Severity::Warning,
        placeholder: true,
    },
    ViewRow {
        event: "System Monitoring Active",
        confidence: 1.0,
        timestamp: "5G Edge Connected",
        severity: &Severity::Info,
        placeholder: true,
    },
];

static PLACEHOLDERS: [ViewRow<'static>; 2] = PLACEHOLDER_ROWS;

/// Lazy iterator over view rows
///
/// Cloning yields an independent iterator from the same position.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    inner: RowsInner<'a>,
}

#[derive(Debug, Clone)]
enum RowsInner<'a> {
    Incidents(vec_deque::Iter<'a, Incident>),
    Placeholders(std::slice::Iter<'static, ViewRow<'static>>),
}

impl<'a> Rows<'a> {
    pub(crate) fn new(incidents: &'a std::collections::VecDeque<Incident>) -> Self {
        let inner = if incidents.is_empty() {
            RowsInner::Placeholders(PLACEHOLDERS.iter())
        } else {
            RowsInner::Incidents(incidents.iter())
        };
        Self { inner }
    }

    /// Whether this iterator yields the placeholder rows
    pub fn is_placeholder(&self) -> bool {
        matches!(self.inner, RowsInner::Placeholders(_))
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = ViewRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            RowsInner::Incidents(iter) => iter.next().map(ViewRow::from),
            RowsInner::Placeholders(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            RowsInner::Incidents(iter) => iter.size_hint(),
            RowsInner::Placeholders(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}
