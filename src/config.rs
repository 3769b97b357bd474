//! Platform configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields a working in-memory platform.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where store state is mirrored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            dir: PathBuf::from(".learnmart"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Mailbox size of every store actor.
    pub channel_buffer: usize,
    /// Delay applied to login and signup.
    pub simulated_latency_ms: u64,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
    pub storage: StorageConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            simulated_latency_ms: 500,
            log_filter: "info".to_string(),
            storage: StorageConfig::default(),
        }
    }
}

impl PlatformConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// A zero-latency, in-memory configuration.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Self::default()
        }
    }
}
