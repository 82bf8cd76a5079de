//! Value-layer configuration via `rdfvalue.toml`
//!
//! Holds the namespace defaults used when session ids are synthesized. The
//! file is optional: absent sections fall back to the platform defaults
//! (`aff4:/flows`, queue `F`).

use crate::error::{Error, Result};
use crate::urn::session::{is_valid_queue_name, DEFAULT_FLOW_BASE, DEFAULT_FLOW_QUEUE};
use crate::urn::Urn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "rdfvalue.toml";

/// Defaults for newly synthesized session ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Namespace session ids are created under
    #[serde(default = "default_base")]
    pub base: String,
    /// Queue session ids are assigned to
    #[serde(default = "default_queue")]
    pub queue: String,
}

fn default_base() -> String {
    DEFAULT_FLOW_BASE.to_string()
}

fn default_queue() -> String {
    DEFAULT_FLOW_QUEUE.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            queue: default_queue(),
        }
    }
}

/// Configuration loaded from `rdfvalue.toml`.
///
/// # Example
///
/// ```toml
/// [session]
/// base = "aff4:/flows"
/// queue = "F"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValuesConfig {
    /// Session id defaults
    #[serde(default)]
    pub session: SessionConfig,
}

impl ValuesConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# rdfvalue configuration
#
# Defaults used when a new session id is synthesized.
[session]
# Namespace new session ids live under
base = "aff4:/flows"
# Queue new session ids are assigned to (letters, digits and dashes)
queue = "F"
"#
    }

    /// Check the values eagerly
    ///
    /// # Errors
    ///
    /// Returns a config error if the base is not an absolute `aff4:/` URN or
    /// the queue is not a valid queue name.
    pub fn validate(&self) -> Result<()> {
        let base = self.session.base.trim();
        if !base.starts_with("aff4:/") || Urn::new(base).path() == "/" {
            return Err(Error::Config(format!(
                "Invalid session base '{}' in {}. Expected an aff4:/ namespace.",
                self.session.base, CONFIG_FILE_NAME
            )));
        }
        if !is_valid_queue_name(&self.session.queue) {
            return Err(Error::Config(format!(
                "Invalid session queue '{}' in {}. Expected letters, digits or dashes.",
                self.session.queue, CONFIG_FILE_NAME
            )));
        }
        Ok(())
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ValuesConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ValuesConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
