use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseSyncError, Result};
use crate::github::client::DEFAULT_API_URL;

/// Directory name under the user config directory
pub const APP_NAME: &str = "emoji-github-releases";

/// Environment variable that overrides the stored token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Persisted settings, including the GitHub personal access token.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

/// Returns the default GitHub API endpoint.
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Returns the default remote used to find the upstream repository.
fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            github_token: None,
            api_url: default_api_url(),
            remote: default_remote(),
        }
    }
}

impl Config {
    /// Stored token, ignoring blank values
    pub fn stored_token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Where a token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    ConfigFile(PathBuf),
}

/// Token from `GITHUB_TOKEN`, if set and not blank
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// The configuration file, read and written as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// `<config_dir>/emoji-github-releases/config.toml`
    ///
    /// # Returns
    /// * `Ok(ConfigStore)` - Store at the platform config location
    /// * `Err` - If the platform has no config directory
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ReleaseSyncError::config("no user config directory on this platform"))?;
        Ok(ConfigStore::new(dir.join(APP_NAME).join("config.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, or defaults when the file does not exist.
    ///
    /// # Returns
    /// * `Ok(Config)` - Loaded or default configuration
    /// * `Err` - If file exists but cannot be read or parsed
    pub fn read(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn write(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Token from the environment or the stored configuration
    pub fn resolve_token(&self, config: &Config) -> Option<(String, TokenSource)> {
        if let Some(token) = token_from_env() {
            return Some((token, TokenSource::Environment));
        }
        config
            .stored_token()
            .map(|t| (t.to_string(), TokenSource::ConfigFile(self.path.clone())))
    }
}
