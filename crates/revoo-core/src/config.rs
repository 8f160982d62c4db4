//! Client configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! backend origin, where the bearer token is kept, and an optional request
//! timeout.
//!
//! Configuration is stored at `~/.config/revoo/config.json`. The
//! `REVOO_API_URL`, `REVOO_TOKEN_BACKEND` and `REVOO_DATA_DIR` environment
//! variables override the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::{FileTokenStore, KeychainTokenStore, MemoryTokenStore, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "revoo";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

pub const ENV_API_URL: &str = "REVOO_API_URL";
pub const ENV_TOKEN_BACKEND: &str = "REVOO_TOKEN_BACKEND";
pub const ENV_DATA_DIR: &str = "REVOO_DATA_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find {0} directory")]
    NoDirectory(&'static str),

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown token backend '{0}' (expected 'file', 'keyring' or 'memory')")]
    UnknownBackend(String),
}

/// Where the bearer token is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
    /// Kept in process memory only; gone when the process exits
    Memory,
}

impl std::str::FromStr for TokenBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(TokenBackend::File),
            "keyring" | "keychain" => Ok(TokenBackend::Keyring),
            "memory" => Ok(TokenBackend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub token_backend: TokenBackend,
    /// No timeout when unset
    pub request_timeout_secs: Option<u64>,
    /// Where the token file lives; the platform data directory when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_backend: TokenBackend::default(),
            request_timeout_secs: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, contents).map_err(io_err)
    }

    /// Override fields from the environment. `lookup` is `std::env::var` in
    /// production and a fixed map in tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(backend) = lookup(ENV_TOKEN_BACKEND).filter(|v| !v.trim().is_empty()) {
            self.token_backend = backend.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir.trim()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoDirectory("config"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the token file: `data_dir` if configured, else
    /// `revoo` under the platform's local data directory
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_local_dir().ok_or(ConfigError::NoDirectory("data"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Build the process-wide token store selected by `token_backend`
    pub fn token_store(&self) -> Result<Arc<dyn TokenStore>, ConfigError> {
        let store: Arc<dyn TokenStore> = match self.token_backend {
            TokenBackend::File => Arc::new(FileTokenStore::new(self.data_dir()?)),
            TokenBackend::Keyring => Arc::new(KeychainTokenStore::new()),
            TokenBackend::Memory => Arc::new(MemoryTokenStore::new()),
        };
        Ok(store)
    }
}
