//! Trait definitions for incident consumers
//!
//! The feed connector delivers into an [`IncidentSink`]. The store implements
//! it, and so does any `FnMut(Incident)` closure.

use crate::Incident;

/// Consumer of delivered incidents
pub trait IncidentSink {
    /// Accept one incident, in delivery order
    fn accept(&mut self, incident: Incident);
}

impl<F> IncidentSink for F
where
    F: FnMut(Incident),
{
    fn accept(&mut self, incident: Incident) {
        self(incident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |incident: Incident| seen.push(incident.event);
            sink.accept(Incident::new("Fire Detected", 0.9, "12:01", Severity::Critical));
            sink.accept(Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning));
        }
        assert_eq!(seen, vec!["Fire Detected", "Person Fallen"]);
    }
}
