//! Wire contracts for the edge server and their validating decoders.
//!
//! Every payload crosses this module before it becomes a domain value. A
//! payload that does not satisfy the contract is a [`DecodeError`], never a
//! half-filled record.
//!
//! List resources decode element by element: invalid elements are logged and
//! skipped so one bad row does not blank a whole screen.

use crate::error::DecodeError;
use pulse_domain::{AnalyticsSnapshot, Camera, CameraStatus, Incident, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incident as sent on the alert stream and by `GET /api/incidents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentPayload {
    /// Description
    pub event: String,
    /// Confidence score
    pub confidence: f64,
    /// Display timestamp
    pub timestamp: String,
    /// Severity tag
    pub severity: String,
}

impl IncidentPayload {
    /// Check the contract and build the domain record
    pub fn validate(self) -> Result<Incident, DecodeError> {
        if self.event.trim().is_empty() {
            return Err(DecodeError::EmptyEvent);
        }

        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DecodeError::ConfidenceOutOfRange(self.confidence));
        }

        let severity = Severity::from_tag(&self.severity);
        if !severity.is_known() {
            tracing::debug!(tag = %severity, event = %self.event, "unclassified severity tag");
        }

        Ok(Incident {
            event: self.event,
            confidence: self.confidence,
            timestamp: self.timestamp,
            severity,
        })
    }
}

impl From<&Incident> for IncidentPayload {
    fn from(incident: &Incident) -> Self {
        Self {
            event: incident.event.clone(),
            confidence: incident.confidence,
            timestamp: incident.timestamp.clone(),
            severity: incident.severity.as_str().to_string(),
        }
    }
}

/// Body of `GET /api/analytics`; absent counters are zero
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsPayload {
    /// Total incidents
    pub total_incidents: u64,
    /// Critical incidents
    pub critical: u64,
    /// Warning incidents
    pub warning: u64,
}

impl From<AnalyticsPayload> for AnalyticsSnapshot {
    fn from(payload: AnalyticsPayload) -> Self {
        Self {
            total_incidents: payload.total_incidents,
            critical: payload.critical,
            warning: payload.warning,
        }
    }
}

/// One element of `GET /api/cameras`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPayload {
    /// Camera identifier
    pub camera_id: String,
    /// Status label ("Online" / "Offline")
    #[serde(default = "default_camera_status")]
    pub status: String,
    /// Stream quality label
    #[serde(default = "default_stream_quality")]
    pub stream_quality: String,
}

fn default_camera_status() -> String {
    CameraStatus::Offline.as_str().to_string()
}

fn default_stream_quality() -> String {
    "—".to_string()
}

impl CameraPayload {
    /// Check the contract and build the domain record
    pub fn validate(self) -> Result<Camera, DecodeError> {
        if self.camera_id.trim().is_empty() {
            return Err(DecodeError::Malformed("camera_id is empty".to_string()));
        }

        Ok(Camera {
            camera_id: self.camera_id,
            status: CameraStatus::parse(&self.status),
            stream_quality: self.stream_quality,
        })
    }
}

/// Decode one alert-stream message
///
/// # Examples
///
/// ```
/// use pulse_sdk::wire::decode_incident;
///
/// let incident = decode_incident(
///     r#"{"event":"Fire Detected","confidence":0.95,"timestamp":"12:01","severity":"critical"}"#,
/// ).unwrap();
/// assert!(incident.is_critical());
///
/// assert!(decode_incident("not json").is_err());
/// ```
pub fn decode_incident(text: &str) -> Result<Incident, DecodeError> {
    let payload: IncidentPayload = serde_json::from_str(text)?;
    payload.validate()
}

/// Decode an incident from an already-parsed JSON value
pub fn decode_incident_value(value: Value) -> Result<Incident, DecodeError> {
    let payload: IncidentPayload = serde_json::from_value(value)?;
    payload.validate()
}

/// Decode the analytics snapshot
pub fn decode_analytics(value: Value) -> Result<AnalyticsSnapshot, DecodeError> {
    if value.is_null() {
        return Ok(AnalyticsSnapshot::empty());
    }
    let payload: AnalyticsPayload = serde_json::from_value(value)?;
    Ok(payload.into())
}

/// Decode the incident list, skipping invalid elements
pub fn decode_incident_list(value: Value) -> Result<Vec<Incident>, DecodeError> {
    decode_list(value, "incidents", decode_incident_value)
}

/// Decode the camera list, skipping invalid elements
pub fn decode_camera_list(value: Value) -> Result<Vec<Camera>, DecodeError> {
    decode_list(value, "cameras", |item| {
        let payload: CameraPayload = serde_json::from_value(item)?;
        payload.validate()
    })
}

/// Accepts a bare array or an object wrapping the array under `key`.
fn decode_list<T, F>(value: Value, key: &'static str, decode: F) -> Result<Vec<T>, DecodeError>
where
    F: Fn(Value) -> Result<T, DecodeError>,
{
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => return Err(DecodeError::NotAList(key)),
        },
        _ => return Err(DecodeError::NotAList(key)),
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match decode(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(resource = key, index, error = %e, "skipping invalid element");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::debug!(
            resource = key,
            kept = decoded.len(),
            total,
            "decoded list with invalid elements"
        );
    }

    Ok(decoded)
}
