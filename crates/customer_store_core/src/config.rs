//! Runtime configuration for the customer store.
//!
//! # Responsibility
//! - Resolve the data file path and logging settings from the environment.
//! - Reject configurations the repository cannot work with.
//!
//! # Invariants
//! - Blank environment values fall back to defaults instead of being used.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "CUSTOMER_STORE_DATA_FILE";
pub const LOG_LEVEL_ENV: &str = "CUSTOMER_STORE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CUSTOMER_STORE_LOG_DIR";
pub const DEFAULT_DATA_FILE: &str = "customers.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BlankDataFile,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDataFile => write!(f, "data file path cannot be blank"),
        }
    }
}

impl Error for ConfigError {}

/// Store and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON data file owned by the repository.
    pub data_file: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Reads `CUSTOMER_STORE_*` variables on top of the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            data_file: non_blank(DATA_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ConfigError::BlankDataFile);
        }
        Ok(())
    }
}
