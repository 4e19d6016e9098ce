//! Configuration for the component loader
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/simple-components/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod markup;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use markup::{FileMarkup, MarkupConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config file location
pub const CONFIG_ENV: &str = "SIMPLE_COMPONENTS_CONFIG";

/// Overrides `logging.level`
pub const LOG_LEVEL_ENV: &str = "SIMPLE_COMPONENTS_LOG";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Attribute conventions
    pub markup: MarkupConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Config file structure
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// Optional [markup] section
    pub markup: Option<FileMarkup>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Config file path: $SIMPLE_COMPONENTS_CONFIG, else ~/.config/simple-components/config.toml
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| {
            p.join(".config")
                .join("simple-components")
                .join("config.toml")
        })
    }

    /// Build from config file contents (no environment overrides)
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_file(file)
    }

    fn from_file(file: FileConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            markup: MarkupConfig::from_file(file.markup)?,
            logging: LoggingConfig::from_file(file.logging),
        })
    }

    /// Load a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    ///
    /// A config file that exists but does not parse is an error rather than
    /// a silent fallback to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub(crate) fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
    }
}
