//! Error types for the Pulse SDK.

use thiserror::Error;

/// A payload that failed validation at the decode boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// Confidence outside [0, 1]
    #[error("Confidence {0} out of range [0, 1]")]
    ConfidenceOutOfRange(f64),

    /// Empty event description
    #[error("Incident has an empty event description")]
    EmptyEvent,

    /// Top-level value is not the expected list
    #[error("Expected a list of {0}")]
    NotAList(&'static str),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, refused)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Response body failed validation
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Endpoint could not be resolved
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Any other request failure
    #[error("Request error: {0}")]
    RequestError(String),
}

impl SdkError {
    /// Whether the failure is on the transport (nothing meaningful was received)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SdkError::ConnectionError(_) | SdkError::Timeout | SdkError::RequestError(_)
        )
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout
        } else if e.is_connect() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::HttpStatus {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::RequestError(e.to_string()),
            }
        } else if e.is_decode() {
            SdkError::Decode(DecodeError::Malformed(e.to_string()))
        } else {
            SdkError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_becomes_malformed() {
        let err: DecodeError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_transport_classification() {
        assert!(SdkError::Timeout.is_transport());
        assert!(SdkError::ConnectionError("refused".into()).is_transport());
        assert!(!SdkError::Decode(DecodeError::EmptyEvent).is_transport());
        assert!(!SdkError::HttpStatus {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
    }

    #[test]
    fn test_display_messages() {
        let err = SdkError::HttpStatus {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(
            DecodeError::ConfidenceOutOfRange(95.0).to_string(),
            "Confidence 95 out of range [0, 1]"
        );
    }
}
