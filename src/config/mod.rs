//! Configuration module for drillfinder
//!
//! Settings come from `config.toml` in the user's config directory, with
//! `DRILLFINDER_*` environment variables layered on top. Every field has a
//! default, so a missing file is not an error.

use crate::discovery::{
    DEFAULT_DEBOUNCE, DEFAULT_INDEX_THRESHOLD, DEFAULT_PAGE_SIZE, DiscoverySettings,
    UnknownTagPolicy,
};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "drillfinder";
const ENV_PREFIX: &str = "DRILLFINDER";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DrillfinderConfig {
    /// Path to the JSON catalog document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Drills per result page
    pub page_size: usize,

    /// Quiet period before typed search text is applied, in milliseconds
    pub debounce_ms: u64,

    /// Handling of selected tags missing from the catalog
    pub unknown_tags: UnknownTagPolicy,

    /// Catalog size above which the inverted tag index is built
    pub index_threshold: usize,

    /// How long a loaded catalog is reused before it is read again
    pub cache_ttl_secs: u64,
}

impl Default for DrillfinderConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(300),
            unknown_tags: UnknownTagPolicy::default(),
            index_threshold: DEFAULT_INDEX_THRESHOLD,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl DrillfinderConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, which may not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or if an
    /// environment override has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Parse configuration from TOML text, without environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid configuration.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Catalog to read: the configured one, else `drills.json` in the data dir
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join("drills.json")))
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Settings for a discovery session
    #[must_use]
    pub const fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            page_size: self.page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            unknown_tags: self.unknown_tags,
            index_threshold: self.index_threshold,
        }
    }
}
