//! Edge server address, resolved from configuration at startup.

use crate::error::SdkError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default edge server host
pub const DEFAULT_HOST: &str = "localhost";

/// Default edge server port
pub const DEFAULT_PORT: u16 = 8000;

/// Transport scheme for the edge server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP / WS
    #[default]
    Http,
    /// TLS: HTTPS / WSS
    Https,
}

impl Scheme {
    /// Scheme used for REST requests
    pub fn http(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Scheme used for the alert stream
    pub fn ws(&self) -> &'static str {
        match self {
            Scheme::Http => "ws",
            Scheme::Https => "wss",
        }
    }

    /// Parse a scheme name; `ws`/`wss` are accepted as aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" | "ws" => Some(Scheme::Http),
            "https" | "wss" => Some(Scheme::Https),
            _ => None,
        }
    }
}

/// Address of the edge server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Transport scheme
    #[serde(default)]
    pub scheme: Scheme,

    /// Host name or address
    pub host: String,

    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(scheme: Scheme, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
        }
    }

    /// Parse an endpoint from a base URL such as `http://edge.local:8000`
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_sdk::{Endpoint, Scheme};
    ///
    /// let endpoint = Endpoint::parse("https://edge.local:9443").unwrap();
    /// assert_eq!(endpoint.scheme, Scheme::Https);
    /// assert_eq!(endpoint.port, 9443);
    /// assert_eq!(endpoint.alerts_url(), "wss://edge.local:9443/ws/alerts");
    /// ```
    pub fn parse(url: &str) -> Result<Self, SdkError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| SdkError::InvalidEndpoint(format!("{}: {}", url, e)))?;

        let scheme = Scheme::parse(parsed.scheme()).ok_or_else(|| {
            SdkError::InvalidEndpoint(format!("unsupported scheme '{}'", parsed.scheme()))
        })?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| SdkError::InvalidEndpoint(format!("{}: missing host", url)))?;

        // Url drops a port equal to the scheme default, so look at the raw authority.
        let explicit_port = url
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .and_then(|authority| authority.rsplit_once(':'))
            .is_some_and(|(_, port)| port.parse::<u16>().is_ok());

        let port = if explicit_port {
            parsed.port_or_known_default().unwrap_or(DEFAULT_PORT)
        } else {
            DEFAULT_PORT
        };

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }

    /// Base URL for REST requests
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme.http(), self.host, self.port)
    }

    /// URL of a REST resource under `/api`
    pub fn api_url(&self, resource: &str) -> String {
        format!("{}/api/{}", self.base_url(), resource.trim_start_matches('/'))
    }

    /// URL of the live alert stream
    pub fn alerts_url(&self) -> String {
        format!("{}://{}:{}/ws/alerts", self.scheme.ws(), self.host, self.port)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(Scheme::Http, DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}
