//! Application settings configuration
//!
//! Defines the audited service set, probe target, and timeouts.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// A named service and the TCP port its TLS endpoint listens on
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub port: u16,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

/// Connectivity probe settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    pub connect_timeout_secs: u64,
    pub handshake_timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            handshake_timeout_secs: 5,
        }
    }
}

impl ProbeSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Host the services are reachable on
    #[serde(default = "default_host")]
    pub host: String,
    /// The fixed set of services whose assets are audited
    #[serde(default = "default_services")]
    pub services: Vec<ServiceSpec>,
    #[serde(default)]
    pub probe: ProbeSettings,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_services() -> Vec<ServiceSpec> {
    vec![
        ServiceSpec::new("redis", 6380),
        ServiceSpec::new("elasticsearch", 9200),
        ServiceSpec::new("minio", 9000),
        ServiceSpec::new("rabbitmq", 5671),
        ServiceSpec::new("opencti", 8080),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            services: default_services(),
            probe: ProbeSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a specific TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}
