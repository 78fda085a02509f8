//! Layered application configuration.
//!
//! Settings are merged with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config FILE`, or `config.toml` in the platform config dir)
//! 3. Environment variables prefixed with `DUPESCAN_` (e.g. `DUPESCAN_IO_THREADS=8`)
//! 4. Command-line flags
//!
//! ```toml
//! strategy = "compare"
//! io_threads = 2
//! hash_chunk_size = 65536
//! compare_chunk_size = 8192
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::duplicates::{FinderConfig, Strategy};
use crate::scanner::{COMPARE_CHUNK_SIZE, HASH_CHUNK_SIZE};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Errors raised while assembling the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    /// A layer holds a value of the wrong shape.
    #[error("Invalid configuration")]
    Invalid(#[from] Box<figment::Error>),

    /// The merged configuration could not be rendered as TOML.
    #[error("Failed to render configuration")]
    Render(#[from] toml::ser::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content comparison strategy.
    pub strategy: Strategy,
    /// Worker threads for content comparison.
    pub io_threads: usize,
    /// Read size for checksum computation, in bytes.
    pub hash_chunk_size: usize,
    /// Read size for direct comparison, in bytes.
    pub compare_chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            io_threads: 4,
            hash_chunk_size: HASH_CHUNK_SIZE,
            compare_chunk_size: COMPARE_CHUNK_SIZE,
        }
    }
}

/// Command-line layer: only the options the user actually passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_chunk_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_chunk_size: Option<usize>,
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupescan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Build the defaults, file and environment layers.
    ///
    /// A missing default file is skipped; a missing explicit file is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if `explicit` does not exist.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound(path.to_path_buf()));
                }
                log::debug!("Loading config from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    log::debug!("Looking for config at {}", path.display());
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load the configuration with the command-line layer on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit file is missing or any layer
    /// holds an invalid value.
    pub fn load(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config: Config = Self::figment(explicit)?
            .merge(Serialized::globals(overrides))
            .extract()
            .map_err(Box::new)?;
        Ok(config.normalized())
    }

    /// Clamp thread count and read sizes to at least 1.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.io_threads = self.io_threads.max(1);
        self.hash_chunk_size = self.hash_chunk_size.max(1);
        self.compare_chunk_size = self.compare_chunk_size.max(1);
        self
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_strategy(self.strategy)
            .with_io_threads(self.io_threads)
            .with_hash_chunk_size(self.hash_chunk_size)
            .with_compare_chunk_size(self.compare_chunk_size)
    }

    /// Render as TOML, in the same shape the config file takes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
