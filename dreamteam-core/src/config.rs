//! Configuration for the dream-team builder.
//!
//! Maps to `dreamteam.toml`. Every value has a default, so an empty file (or
//! none at all) is a valid configuration. Environment variables prefixed
//! with `DREAMTEAM_` override file values; nested keys use `__`, e.g.
//! `DREAMTEAM_API__BACKEND_URL=https://example.com`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DreamTeamError, Result};
use crate::formation;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "DREAMTEAM";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DreamTeamConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Remote data service settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Lineup builder defaults.
    #[serde(default)]
    pub builder: BuilderConfig,
}

impl DreamTeamConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `DreamTeamError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| DreamTeamError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load an optional file, then apply `DREAMTEAM_*` variables from the
    /// process environment.
    ///
    /// # Errors
    /// Returns `DreamTeamError::Config` if a source cannot be read or the
    /// merged values do not deserialize or validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::layered(path, None)
    }

    /// Like [`load`](Self::load), but reads overrides from `env` instead of
    /// the process environment.
    ///
    /// # Errors
    /// Same as [`load`](Self::load).
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        Self::layered(path, Some(env))
    }

    fn layered(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    /// Returns `DreamTeamError::Config` naming the offending key, or
    /// `UnknownTemplate` if the default formation does not exist.
    pub fn validate(&self) -> Result<()> {
        let url = self.api.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DreamTeamError::Config(format!(
                "api.backend_url must be an http(s) URL, got `{url}`"
            )));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(DreamTeamError::Config(
                "api.request_timeout_ms must be positive".to_string(),
            ));
        }
        formation::template(&self.builder.default_formation)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Remote data service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Path prefix under which the API is mounted.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Hard timeout for any request in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Call `POST /init-data` once at startup.
    #[serde(default = "default_true")]
    pub seed_on_startup: bool,
}

impl ApiConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> String {
        let host = self.backend_url.trim().trim_end_matches('/');
        let prefix = self.api_prefix.trim().trim_matches('/');
        if prefix.is_empty() {
            host.to_string()
        } else {
            format!("{host}/{prefix}")
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            api_prefix: default_api_prefix(),
            request_timeout_ms: default_timeout_ms(),
            seed_on_startup: true,
        }
    }
}

/// Lineup builder defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Template selected when a session starts.
    #[serde(default = "default_formation")]
    pub default_formation: String,
    /// Theme name recorded on a saved formation when no theme is selected.
    #[serde(default = "default_theme_name")]
    pub fallback_theme_name: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_formation: default_formation(),
            fallback_theme_name: default_theme_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_backend_url() -> String { "http://localhost:8001".to_string() }
fn default_api_prefix() -> String { "/api".to_string() }
fn default_timeout_ms() -> u64 { 10_000 }
fn default_formation() -> String { formation::DEFAULT_TEMPLATE.to_string() }
fn default_theme_name() -> String { "General".to_string() }
