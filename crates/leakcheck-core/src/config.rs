//! Configuration management for LeakCheck.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/leakcheck/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lookup service settings
    pub server: ServerConfig,
    /// Breach store settings
    pub database: DatabaseConfig,
    /// Which lookup backend a session controller talks to
    pub backend: BackendConfig,
    /// Stand-in generator settings
    pub standin: StandInConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// if the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LEAKCHECK_BIND_ADDR`: Override the service listen address
    /// - `LEAKCHECK_DATABASE_PATH`: Override the breach store file
    /// - `LEAKCHECK_BACKEND_URL`: Override the lookup service URL
    /// - `LEAKCHECK_STANDIN_DELAY_MS`: Override the stand-in delay
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LEAKCHECK_BIND_ADDR") {
            tracing::debug!("Override server.bind_addr from env: {}", val);
            self.server.bind_addr = val;
        }

        if let Some(val) = var("LEAKCHECK_DATABASE_PATH") {
            tracing::debug!("Override database.path from env: {}", val);
            self.database.path = Some(PathBuf::from(val));
        }

        if let Some(val) = var("LEAKCHECK_BACKEND_URL") {
            tracing::debug!("Override backend.url from env: {}", val);
            self.backend.url = val;
        }

        if let Some(val) = var("LEAKCHECK_STANDIN_DELAY_MS") {
            match val.parse() {
                Ok(delay_ms) => {
                    self.standin.delay_ms = delay_ms;
                    tracing::debug!("Override standin.delay_ms from env: {}", delay_ms);
                }
                Err(e) => tracing::warn!("Ignoring LEAKCHECK_STANDIN_DELAY_MS={}: {}", val, e),
            }
        }
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/leakcheck/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/leakcheck`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    fn project_dirs() -> ConfigResult<ProjectDirs> {
        ProjectDirs::from("com", "leakcheck", "leakcheck").ok_or(ConfigError::NoConfigDir)
    }
}

/// Lookup service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// `Access-Control-Max-Age` for CORS preflight responses, in seconds
    pub cors_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            cors_max_age_secs: 86_400,
        }
    }
}

/// Breach store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; defaults to `leakcheck.db` in the data directory
    pub path: Option<PathBuf>,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Resolve the database file path.
    pub fn resolved_path(&self) -> ConfigResult<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(AppConfig::data_dir()?.join("leakcheck.db")),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 5,
        }
    }
}

/// Lookup backend used by a session controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Random demonstration generator
    #[default]
    StandIn,
    /// Remote lookup service over HTTP
    Http,
    /// Local breach store
    Store,
}

/// Lookup backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend selection
    pub kind: BackendKind,
    /// Base URL of the lookup service (for [`BackendKind::Http`])
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl BackendConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::StandIn,
            url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            user_agent: "LeakCheck/0.1.0 (+https://github.com/leakcheck/leakcheck)".to_string(),
        }
    }
}

/// Stand-in generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandInConfig {
    /// Simulated network latency in milliseconds
    pub delay_ms: u64,
}

impl StandInConfig {
    /// Simulated latency as a `Duration`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for StandInConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}
