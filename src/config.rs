//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.venice/config.toml` (user)
//! 3. `/etc/venice/config.toml` (system)
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.venice/secrets.toml` (user, must be 0600)
//! 2. `/etc/venice/secrets.toml` (system, must be 0600)
//!
//! When no secrets file provides a key, `VENICE_API_KEY` is used.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::providers::RetryConfig;
use crate::settings::{Mode, VeniceSettings};
use crate::types::VeniceOptions;
use crate::{Result, VeniceError};

/// Environment variable consulted when no secrets file holds a key.
pub const API_KEY_ENV_VAR: &str = "VENICE_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub venice: VeniceSettings,
    #[serde(default)]
    pub retry: RetrySection,
}

/// Retry tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySection {
    /// Attempts including the first request (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds (default: 500).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay in milliseconds (default: 30000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl RetrySection {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_attempts(self.max_attempts)
            .initial_delay(Duration::from_millis(self.initial_delay_ms))
            .max_delay(Duration::from_millis(self.max_delay_ms))
    }
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub venice: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.venice/config.toml`
    /// 3. `/etc/venice/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_from_file(&path)
    }

    /// Like [`load`](Self::load), but an absent config file (when no explicit
    /// path is given) yields the defaults.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        if explicit_path.is_some() {
            return Self::load(explicit_path);
        }
        match Self::standard_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            VeniceError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            VeniceError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Handler options for `mode`, with the API key taken from `secrets`
    /// when the config itself has none.
    pub fn options(&self, mode: Mode, secrets: &Secrets) -> VeniceOptions {
        let mut options = self.venice.to_options(mode);
        if options.api_key.is_none() {
            options.api_key = secrets.api_key();
        }
        options
    }

    fn standard_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(2);
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".venice").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/venice/config.toml"));
        paths
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(VeniceError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        Self::standard_paths()
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| {
                VeniceError::Configuration(
                    "No config file found. Create ~/.venice/config.toml or /etc/venice/config.toml"
                        .to_string(),
                )
            })
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".venice").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/venice/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file, rejecting group/world-readable files.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            VeniceError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            VeniceError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            VeniceError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(VeniceError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// The Venice API key, falling back to `VENICE_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_or(std::env::var(API_KEY_ENV_VAR).ok())
    }

    /// The file's key, or `fallback` when the file has none. Blank values on
    /// either side count as absent.
    fn api_key_or(&self, fallback: Option<String>) -> Option<String> {
        let non_blank = |k: &String| !k.trim().is_empty();
        self.venice
            .as_ref()
            .map(|s| s.api_key.clone())
            .filter(non_blank)
            .or_else(|| fallback.filter(non_blank))
    }
}
