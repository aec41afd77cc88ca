//! Derived views: pure display transforms over fetched snapshots.
//!
//! Every view is built from a fetch result and never fails. Transport or
//! decode failures are logged and replaced by the view's fallback content.

use pulse_domain::{AnalyticsSnapshot, Camera, Incident};
use pulse_sdk::SdkError;
use pulse_store::IncidentStore;

/// Bar length, in columns, of the largest value in a chart
pub const FULL_BAR: usize = 40;

/// Shortest bar drawn for any value, so small values stay visible
pub const MIN_BAR: usize = 2;

/// Chart period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    /// Monday to Sunday
    #[default]
    Week,
    /// Weeks one to four
    Month,
    /// January to December
    Year,
}

const WEEK_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEK_VALUES: [u64; 7] = [24, 18, 32, 28, 41, 35, 22];

const MONTH_LABELS: [&str; 4] = ["W1", "W2", "W3", "W4"];
const MONTH_VALUES: [u64; 4] = [98, 124, 87, 156];

const YEAR_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const YEAR_VALUES: [u64; 12] = [320, 410, 280, 530, 380, 460, 500, 440, 520, 390, 470, 510];

impl Period {
    /// All periods, in selector order
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Year => "Year",
        }
    }

    /// X-axis labels
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            Period::Week => &WEEK_LABELS,
            Period::Month => &MONTH_LABELS,
            Period::Year => &YEAR_LABELS,
        }
    }

    /// Chart values, one per label
    pub fn values(&self) -> &'static [u64] {
        match self {
            Period::Week => &WEEK_VALUES,
            Period::Month => &MONTH_VALUES,
            Period::Year => &YEAR_VALUES,
        }
    }
}

/// Y-axis maximum: the largest value, never below 1
pub fn axis_max(values: &[u64]) -> u64 {
    values.iter().copied().fold(1, u64::max)
}

/// Bar length for `value` on an axis topping out at `max`
pub fn bar_length(value: u64, max: u64, full: usize, min_bar: usize) -> usize {
    let scaled = (value as f64 / max.max(1) as f64 * full as f64).round() as usize;
    scaled.max(min_bar)
}

/// One labelled chart bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// X-axis label
    pub label: &'static str,
    /// Raw value
    pub value: u64,
    /// Length in columns
    pub length: usize,
}

/// Analytics screen: severity counts plus the period chart
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    /// Selected period
    pub period: Period,
    /// Critical incident count
    pub critical: u64,
    /// Warning incident count
    pub warning: u64,
    /// Total incident count
    pub total_incidents: u64,
    /// Y-axis maximum
    pub axis_max: u64,
    /// Bars, in label order
    pub bars: Vec<Bar>,
}

impl AnalyticsView {
    /// Build the view; a failed fetch renders as zero counts
    pub fn from_fetch(fetched: Result<AnalyticsSnapshot, SdkError>, period: Period) -> Self {
        let snapshot = fetched.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "analytics unavailable; showing zero counts");
            AnalyticsSnapshot::empty()
        });

        let values = period.values();
        let max = axis_max(values);
        let bars = period
            .labels()
            .iter()
            .zip(values)
            .map(|(&label, &value)| Bar {
                label,
                value,
                length: bar_length(value, max, FULL_BAR, MIN_BAR),
            })
            .collect();

        Self {
            period,
            critical: snapshot.critical,
            warning: snapshot.warning,
            total_incidents: snapshot.total_incidents,
            axis_max: max,
            bars,
        }
    }
}

/// Camera list; a failed or empty fetch shows the placeholder cameras
pub fn cameras_from_fetch(fetched: Result<Vec<Camera>, SdkError>) -> Vec<Camera> {
    match fetched {
        Ok(cameras) if !cameras.is_empty() => cameras,
        Ok(_) => {
            tracing::debug!("no cameras reported; showing placeholders");
            Camera::placeholders()
        }
        Err(e) => {
            tracing::warn!(error = %e, "cameras unavailable; showing placeholders");
            Camera::placeholders()
        }
    }
}

/// Incident store loaded from a fetch; a failed fetch leaves it empty
///
/// The server list is taken as oldest first, so the newest incident ends up
/// at the head of the store.
pub fn store_from_fetch(fetched: Result<Vec<Incident>, SdkError>, capacity: usize) -> IncidentStore {
    let mut store = IncidentStore::new(capacity);
    match fetched {
        Ok(incidents) => store.extend(incidents),
        Err(e) => tracing::warn!(error = %e, "incidents unavailable; showing placeholders"),
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{CameraStatus, Severity};

    #[test]
    fn test_period_series_lengths_match() {
        for period in Period::ALL {
            assert_eq!(period.labels().len(), period.values().len());
        }
    }

    #[test]
    fn test_axis_max() {
        assert_eq!(axis_max(Period::Week.values()), 41);
        assert_eq!(axis_max(Period::Month.values()), 156);
        assert_eq!(axis_max(Period::Year.values()), 530);
        assert_eq!(axis_max(&[]), 1);
        assert_eq!(axis_max(&[0, 0]), 1);
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(41, 41, 40, 2), 40);
        assert_eq!(bar_length(0, 41, 40, 2), 2);
        assert_eq!(bar_length(20, 40, 40, 2), 20);
        assert_eq!(bar_length(5, 0, 40, 2), 200);
    }

    #[test]
    fn test_failed_analytics_renders_zero_counts_and_static_chart() {
        let fetched = Err(SdkError::ConnectionError("connection refused".to_string()));
        let view = AnalyticsView::from_fetch(fetched, Period::Week);

        assert_eq!(view.critical, 0);
        assert_eq!(view.warning, 0);
        assert_eq!(view.axis_max, 41);
        let labels: Vec<_> = view.bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, WEEK_LABELS);
        let values: Vec<_> = view.bars.iter().map(|b| b.value).collect();
        assert_eq!(values, WEEK_VALUES);
        assert_eq!(view.bars[4].length, FULL_BAR);
    }

    #[test]
    fn test_analytics_counts_from_snapshot() {
        let snapshot = AnalyticsSnapshot {
            total_incidents: 12,
            critical: 3,
            warning: 5,
        };
        let view = AnalyticsView::from_fetch(Ok(snapshot), Period::Month);
        assert_eq!((view.critical, view.warning, view.total_incidents), (3, 5, 12));
        assert_eq!(view.bars.len(), 4);
        assert_eq!(view.axis_max, 156);
    }

    #[test]
    fn test_cameras_fallback() {
        let failed = cameras_from_fetch(Err(SdkError::Timeout));
        assert_eq!(failed, Camera::placeholders());

        let empty = cameras_from_fetch(Ok(Vec::new()));
        assert_eq!(empty.len(), 3);

        let live = vec![Camera::new("CAM-09", CameraStatus::Online, "4K")];
        assert_eq!(cameras_from_fetch(Ok(live.clone())), live);
    }

    #[test]
    fn test_store_from_fetch() {
        let incidents = vec![
            Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical),
            Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning),
        ];
        let store = store_from_fetch(Ok(incidents), 10);
        let events: Vec<_> = store.rows().map(|row| row.event).collect();
        assert_eq!(events, ["Person Fallen", "Fire Detected"]);

        let store = store_from_fetch(Err(SdkError::Timeout), 10);
        assert!(store.rows().is_placeholder());
    }
}
