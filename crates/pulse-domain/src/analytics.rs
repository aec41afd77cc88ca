//! Aggregate counters served by the analytics endpoint

/// Snapshot of incident totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsSnapshot {
    /// Total incidents recorded
    pub total_incidents: u64,
    /// Critical incidents
    pub critical: u64,
    /// Warning incidents
    pub warning: u64,
}

impl AnalyticsSnapshot {
    /// Zero-valued snapshot shown when nothing could be fetched
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether every counter is zero
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = AnalyticsSnapshot::empty();
        assert_eq!(snapshot.critical, 0);
        assert_eq!(snapshot.warning, 0);
        assert!(snapshot.is_empty());

        let snapshot = AnalyticsSnapshot {
            critical: 2,
            ..Default::default()
        };
        assert!(!snapshot.is_empty());
    }
}
