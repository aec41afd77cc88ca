//! Integration tests for the incident store and its row view

use proptest::prelude::*;
use pulse_domain::{Incident, IncidentSink, Severity};
use pulse_store::{IncidentStore, PLACEHOLDER_ROWS};

fn fire() -> Incident {
    Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical)
}

fn fall() -> Incident {
    Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning)
}

#[test]
fn test_two_arrivals_replace_placeholders() {
    let mut store = IncidentStore::default();
    store.append(fire());
    store.append(fall());

    let rows: Vec<_> = store.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].event, "Person Fallen");
    assert_eq!(*rows[0].severity, Severity::Warning);
    assert_eq!(rows[1].event, "Fire Detected");
    assert_eq!(rows[1].timestamp, "12:01");
    assert!(rows.iter().all(|r| !r.placeholder));
}

#[test]
fn test_empty_store_renders_exactly_the_placeholders() {
    let store = IncidentStore::default();
    let rows: Vec<_> = store.rows().collect();
    assert_eq!(rows, PLACEHOLDER_ROWS.to_vec());
}

#[test]
fn test_rows_restart_on_each_call() {
    let mut store = IncidentStore::default();
    store.append(fire());

    let first: Vec<_> = store.rows().map(|r| r.event).collect();
    let second: Vec<_> = store.rows().map(|r| r.event).collect();
    assert_eq!(first, second);
}

#[test]
fn test_clear_brings_placeholders_back() {
    let mut store = IncidentStore::default();
    store.accept(fire());
    assert!(!store.rows().is_placeholder());

    store.clear();
    assert!(store.rows().is_placeholder());
}

proptest! {
    #[test]
    fn prop_rows_are_bounded_and_newest_first(count in 0usize..60, capacity in 1usize..25) {
        let mut store = IncidentStore::new(capacity);
        for n in 0..count {
            store.append(Incident::new(format!("event-{n}"), 0.5, "t", Severity::Info));
        }

        let rows: Vec<_> = store.rows().filter(|r| !r.placeholder).collect();
        prop_assert_eq!(rows.len(), count.min(capacity));

        let expected: Vec<String> = (0..count)
            .rev()
            .take(capacity)
            .map(|n| format!("event-{n}"))
            .collect();
        let actual: Vec<String> = rows.iter().map(|r| r.event.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }
}
