//! Configuration management for extcp
//!
//! Settings are merged from built-in defaults, an optional YAML/TOML/JSON file
//! and `EXTCP__SECTION__KEY` environment variables, then validated.
//!
//! # Examples
//!
//! ```rust
//! use extcp_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .build()
//!     .expect("defaults are valid");
//!
//! assert_eq!(config.copy.default_extension.as_str(), ".JPG");
//! assert_eq!(config.ui.poll_interval.as_millis(), 100);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use extcp_types::{Extension, PollInterval};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Main configuration structure for extcp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Copy behaviour
    #[serde(default)]
    pub copy: CopyConfig,
    /// Interactive front-end settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Copy behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Extension used when the user leaves the extension empty
    #[serde(default)]
    pub default_extension: Extension,
    /// Ask for confirmation before a run starts
    #[serde(default = "default_true")]
    pub confirm_before_copy: bool,
    /// Keep incrementing a rename counter while the generated name exists
    #[serde(default)]
    pub rename_probe_existing: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            default_extension: Extension::default(),
            confirm_before_copy: true,
            rename_probe_existing: false,
        }
    }
}

/// Interactive front-end settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Interval between two polls of the progress channel, in milliseconds
    #[serde(default, rename = "poll_interval_ms")]
    pub poll_interval: PollInterval,
    /// Draw a progress bar while copying
    #[serde(default = "default_true")]
    pub progress_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval: PollInterval::default(),
            progress_bar: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatting
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}
