//! Run configuration: declarative port layout, loadable from TOML.
//!
//! A host process usually knows a node's ports from its graph
//! composition; `RunConfig` lets the same declaration live in a config
//! file:
//!
//! ```toml
//! [[inputs]]
//! name = "video-in"
//!
//! [[outputs]]
//! name = "video-out"
//! capacity = 64
//! ```

use crate::error::{Error, Result};
use crate::host::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Declaration of one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    /// Queue depth for this port.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl PortSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Port layout of one node run. Declaration order is drain order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub inputs: Vec<PortSpec>,
    #[serde(default)]
    pub outputs: Vec<PortSpec>,
}

impl RunConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
