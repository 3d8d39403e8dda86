//! Configuration loading and management

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}

/// Runtime configuration for the roster service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Fixture file to import at startup, if any
    pub fixture_file: Option<String>,

    /// Page size applied when a request does not specify one
    pub default_page_size: usize,

    /// Upper bound the HTTP layer caps requested page sizes at
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fixture_file: None,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string(),
                }
            } else {
                ConfigError::Io {
                    message: e.to_string(),
                }
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            file: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
