//! Application configuration.
//!
//! Defines the YAML-serializable settings that pick the application name, the
//! default command, and whether the default command is the only one run.
//!
//! # Example YAML
//!
//! ```yaml
//! name: Deploy Tool
//! default_command: help
//! only_default_command: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Dispatcher settings applied with
/// [`Application::apply_config`](crate::Application::apply_config).
///
/// Every field is optional in YAML.
///
/// # Examples
///
/// ```
/// use console_kit_dispatch::ApplicationConfig;
///
/// let config = ApplicationConfig::from_yaml_str("default_command: serve\n").unwrap();
/// assert_eq!(config.default_command.as_deref(), Some("serve"));
/// assert!(config.name.is_none());
/// assert!(!config.only_default_command);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Name shown at the top of `help` output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Command run when the command line does not name a registered one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_command: Option<String>,
    /// Always run the default command, treating the first positional token as
    /// its argument 0.
    pub only_default_command: bool,
}

impl ApplicationConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConsoleError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ConsoleError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConsoleError::Io) if the file cannot be written,
    /// or [`Yaml`](crate::ConsoleError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](crate::ConsoleError::Yaml) if parsing fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
