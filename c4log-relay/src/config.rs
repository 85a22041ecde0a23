//! Relay configuration
//!
//! Hosts that embed LiteCore usually want the log level and library path in
//! their own config file. `RelayConfig` is a small TOML-friendly table:
//!
//! ```toml
//! min_level = "info"
//! library = "/opt/couchbase/lib/libLiteCore.so"
//! ```

use crate::types::{LogLevel, RelayError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for arming the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Minimum severity LiteCore should deliver (default: debug)
    #[serde(default = "default_min_level")]
    pub min_level: LogLevel,

    /// LiteCore shared library to load at runtime, if not linked
    #[serde(default)]
    pub library: Option<PathBuf>,
}

fn default_min_level() -> LogLevel {
    LogLevel::DEBUG
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            library: None,
        }
    }
}

impl RelayConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the minimum severity
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Builder method: set the LiteCore shared library path
    pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.library = Some(path.into());
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RelayError::ConfigParse(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading relay config from: {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            RelayError::ConfigParse(msg) => {
                RelayError::ConfigParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }
}
