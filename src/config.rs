//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/etlr/etlr.toml`
//! 3. Environment variables: `ETLR_*` prefix
//! 4. `--api-key` on the command line (applied by the client, not here)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Production endpoint of the workflows API.
pub const DEFAULT_BASE_URL: &str = "https://api.etlr.io/workflows";

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Unified configuration for etlr.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// API key sent as `X-API-KEY`
    pub api_key: Option<String>,
    /// Endpoint all requests are posted to
    pub base_url: String,
    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the API key out of debug logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Raw settings for intermediate parsing (all fields optional).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Get the XDG config directory for etlr.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "etlr").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("etlr.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            api_key: overlay.api_key.clone().or_else(|| self.api_key.clone()),
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
        }
    }

    /// Load settings with layered precedence from the default global path.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` as the global config layer.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with(config_file, None)
    }

    /// Like [`Settings::load_from`], reading `ETLR_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;

        if current.timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "timeout_secs must be greater than zero".into(),
            });
        }

        Ok(current)
    }

    /// Apply ETLR_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ETLR")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("api_key") {
            if !val.is_empty() {
                settings.api_key = Some(val);
            }
        }
        if let Ok(val) = config.get_string("base_url") {
            settings.base_url = val;
        }
        match config.get::<u64>("timeout_secs") {
            Ok(val) => settings.timeout_secs = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
