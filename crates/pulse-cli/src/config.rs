//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use pulse_feed::FeedConfig;
use pulse_sdk::{Endpoint, Scheme, DEFAULT_HOST, DEFAULT_PORT};
use pulse_store::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Alert feed connector settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// File this configuration was loaded from
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// Edge server profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Transport scheme
    #[serde(default)]
    pub scheme: Scheme,

    /// Edge server host
    pub host: String,

    /// Edge server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Incidents kept by the live view
    #[serde(default = "default_store_capacity")]
    pub store_capacity: usize,

    /// Live view redraw interval (milliseconds)
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Per-invocation endpoint overrides from flags or environment.
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    /// Host override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Scheme override
    pub scheme: Option<Scheme>,
}

impl Profile {
    /// Endpoint described by this profile.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.scheme, self.host.clone(), self.port)
    }
}

impl From<Endpoint> for Profile {
    fn from(endpoint: Endpoint) -> Self {
        Self {
            scheme: endpoint.scheme,
            host: endpoint.host,
            port: endpoint.port,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            scheme: Scheme::Http,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".pulse").join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path()?,
        };
        self.save_to(&path)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Remove a profile. The active profile cannot be removed.
    ///
    /// Returns whether a profile by that name existed.
    pub fn remove_profile(&mut self, name: &str) -> Result<bool> {
        if name == self.active_profile {
            return Err(CliError::NotPermitted(
                "Cannot delete the active profile".to_string(),
            ));
        }
        Ok(self.profiles.remove(name).is_some())
    }

    /// Resolve the edge server endpoint: active profile, then overrides.
    pub fn resolve_endpoint(&self, overrides: &EndpointOverrides) -> Result<Endpoint> {
        let mut endpoint = self.get_active_profile()?.endpoint();

        if let Some(host) = &overrides.host {
            if host.trim().is_empty() {
                return Err(CliError::InvalidInput("host must not be empty".to_string()));
            }
            endpoint.host = host.trim().to_string();
        }
        if let Some(port) = overrides.port {
            endpoint.port = port;
        }
        if let Some(scheme) = overrides.scheme {
            endpoint.scheme = scheme;
        }

        tracing::debug!(%endpoint, profile = %self.active_profile, "resolved edge endpoint");
        Ok(endpoint)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            feed: FeedConfig::default(),
            source: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            store_capacity: DEFAULT_CAPACITY,
            refresh_ms: default_refresh_ms(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_store_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_refresh_ms() -> u64 {
    250
}
