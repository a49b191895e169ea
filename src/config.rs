//! Configuration for the diamond-viz client.
//!
//! YAML file with precedence: CLI > ENV > file > defaults. The binary
//! applies CLI flags last, on top of [`Config::resolve`].

use crate::api::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URI: &str = "DIAMOND_API_URI";
/// Environment variable overriding `insights.seed`.
pub const ENV_FALLBACK_SEED: &str = "DIAMOND_FALLBACK_SEED";

/// Prediction API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the prediction service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Insights panel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Seed of the fallback sample generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Open the panel when the UI starts.
    #[serde(default)]
    pub show_on_start: bool,
}

fn default_seed() -> u64 {
    42
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            show_on_start: false,
        }
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable vim-style navigation keys (j/k).
    #[serde(default = "default_vim_keys")]
    pub vim_keys: bool,
}

fn default_vim_keys() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            vim_keys: default_vim_keys(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Insights settings.
    #[serde(default)]
    pub insights: InsightsConfig,

    /// UI settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/diamond-viz/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("diamond-viz").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        // an empty file is a valid, all-default config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_ms == 0 {
            return Err(Error::ConfigInvalid {
                key: "api.timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::ConfigInvalid {
                key: "api.base_url".to_string(),
                message: format!("'{url}' is not an http(s) URL"),
            });
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if an override does not parse or
    /// leaves the config invalid.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URI).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(seed) = lookup(ENV_FALLBACK_SEED) {
            self.insights.seed = seed.trim().parse().map_err(|_| Error::ConfigInvalid {
                key: ENV_FALLBACK_SEED.to_string(),
                message: format!("'{seed}' is not an unsigned integer"),
            })?;
        }
        self.validate()
    }

    /// File (explicit path, else the default path if it exists) plus
    /// process environment.
    ///
    /// # Errors
    ///
    /// An explicit path must exist and parse; a missing default file falls
    /// back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(p) => Self::load(p)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }
}
