//! Logger options record and loaders

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Environment variable overriding `measurement_id`
pub const ENV_MEASUREMENT_ID: &str = "GTAG_MEASUREMENT_ID";
/// Environment variable overriding `user_id`
pub const ENV_USER_ID: &str = "GTAG_USER_ID";
/// Environment variable overriding `account_id`
pub const ENV_ACCOUNT_ID: &str = "GTAG_ACCOUNT_ID";

/// Handle on a provider's options, shared by every logger it creates
///
/// Cloning the handle never copies the options: a write through any clone is
/// seen by all of them.
pub type SharedOptions = Arc<RwLock<GTagLoggerOptions>>;

/// Options for a gtag logger provider
///
/// Missing fields fall back to the defaults, so a partial record merges
/// over `{ measurement_id: "" }`. An empty `measurement_id` means unset and
/// keeps every logger silent.
///
/// # Example
///
/// ```
/// use gtag_log::config::GTagLoggerOptions;
///
/// let options = GTagLoggerOptions::from_yaml_str("measurementId: G-12345").unwrap();
/// assert_eq!(options.measurement_id, "G-12345");
/// assert!(options.user_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GTagLoggerOptions {
    /// Target measurement stream (`send_to`)
    #[serde(alias = "measurementId")]
    pub measurement_id: String,
    #[serde(alias = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(alias = "accountId", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl GTagLoggerOptions {
    /// Create options with an empty measurement id
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the measurement id
    pub fn with_measurement_id(mut self, id: impl Into<String>) -> Self {
        self.measurement_id = id.into();
        self
    }

    /// Set the user identity
    pub fn with_user(mut self, user_id: impl Into<String>, account_id: Option<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.account_id = account_id;
        self
    }

    /// Whether a measurement id is configured
    pub fn has_measurement_id(&self) -> bool {
        !self.measurement_id.is_empty()
    }

    /// Parse options from YAML
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document is null in YAML
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse options from JSON
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load options from a file, picking the format from its extension
    ///
    /// `.json` files are read as JSON and everything else as YAML. A missing
    /// file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "gtag options file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") | None => Self::from_yaml_str(&content),
            Some(other) => Err(ConfigError::Other(format!(
                "Unsupported options file extension: {}",
                other
            ))),
        }
    }

    /// Load options from the user config file (see `user_config_path`)
    pub fn load_user() -> ConfigResult<Self> {
        Self::load(user_config_path())
    }

    /// Apply `GTAG_*` environment variables on top of these options
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(id) = non_empty(ENV_MEASUREMENT_ID) {
            self.measurement_id = id;
        }
        if let Some(user_id) = non_empty(ENV_USER_ID) {
            self.user_id = Some(user_id);
        }
        if let Some(account_id) = non_empty(ENV_ACCOUNT_ID) {
            self.account_id = Some(account_id);
        }
        self
    }

    /// Wrap these options in a shared handle
    pub fn into_shared(self) -> SharedOptions {
        Arc::new(RwLock::new(self))
    }
}

/// User-level options file (`~/.config/gtag-log/config.yaml` on Linux)
pub fn user_config_path() -> PathBuf {
    // Use XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
    let config_dir = dirs::config_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
    });
    config_dir.join("gtag-log").join("config.yaml")
}
