//! Configuration loader utilities

use crate::{Config, ConfigBuilder, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override configuration values
pub const ENV_PREFIX: &str = "EXTCP";

/// Configuration loader with common loading patterns
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the first file found in the default locations
    pub fn load_default() -> ConfigResult<Config> {
        let mut builder = ConfigBuilder::new();

        if let Some(path) = Self::config_exists() {
            builder = builder.add_source_file(path);
        }

        builder.add_env_prefix(ENV_PREFIX).build()
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Configuration file not found",
                ),
            });
        }

        ConfigBuilder::new()
            .add_source_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Load from `path` when given, otherwise from the default locations
    pub fn load(path: Option<&Path>) -> ConfigResult<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_default(),
        }
    }

    /// Render configuration in the format implied by `path`'s extension
    pub fn render_for(config: &Config, path: &Path) -> ConfigResult<String> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(config).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to TOML: {}", e))
            }),
            Some("json") => serde_json::to_string_pretty(config).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to JSON: {}", e))
            }),
            _ => serde_yaml::to_string(config).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize to YAML: {}", e))
            }),
        }
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(config: &Config, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = Self::render_for(config, path)?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default configuration file paths in order of preference
    fn default_config_paths() -> Vec<PathBuf> {
        ["extcp.yaml", "extcp.yml", "extcp.toml", "extcp.json"]
            .iter()
            .map(PathBuf::from)
            .collect()
    }

    /// First configuration file present in the default locations
    pub fn config_exists() -> Option<PathBuf> {
        Self::default_config_paths()
            .into_iter()
            .find(|path| path.exists())
    }
}
