//! # Configuration Management
//!
//! Handles the optional `config.toml` settings file and the directory it
//! lives in. Every setting has a default, so a missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::consts::{APP_NAME, DEFAULT_GRAPHQL_URL, ENV_CONFIG_DIR, ENV_GRAPHQL_URL, GITHUB_MACHINE};
use crate::error::{PrLinkError, Result};

/// Represents the configuration directory for prlink
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the configuration directory, honouring `PRLINK_CONFIG_DIR`.
  pub fn new() -> Result<Self> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
      return Ok(Self::at(dir));
    }

    let proj_dirs = ProjectDirs::from("", "", APP_NAME)
      .ok_or_else(|| PrLinkError::Settings("failed to determine project directories".to_string()))?;

    Ok(Self::at(proj_dirs.config_dir()))
  }

  /// Use an explicit configuration directory.
  pub fn at(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the path to the settings file
  pub fn settings_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load settings from `config.toml`, falling back to defaults.
  pub fn load_settings(&self) -> Result<Settings> {
    let path = self.settings_path();

    let settings = if path.exists() {
      let content = fs::read_to_string(&path)
        .map_err(|e| PrLinkError::Settings(format!("failed to read {}: {e}", path.display())))?;
      Settings::from_toml(&content).map_err(|e| match e {
        PrLinkError::Settings(message) => PrLinkError::Settings(format!("{message} ({})", path.display())),
        other => other,
      })?
    } else {
      debug!(path = %path.display(), "No settings file, using defaults");
      Settings::default()
    };

    settings.with_env_overrides()
  }
}

/// GitHub connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitHubSettings {
  /// GraphQL endpoint.
  pub graphql_url: String,
  /// Credential store key for the token.
  pub machine: String,
}

impl Default for GitHubSettings {
  fn default() -> Self {
    Self {
      graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
      machine: GITHUB_MACHINE.to_string(),
    }
  }
}

/// Contents of `config.toml`.
///
/// ```toml
/// [github]
/// graphql_url = "https://api.github.com/graphql"
/// machine = "github.com"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  pub github: GitHubSettings,
}

impl Settings {
  /// Parse and validate settings TOML.
  pub fn from_toml(content: &str) -> Result<Self> {
    let settings: Settings = toml::from_str(content).map_err(|e| PrLinkError::Settings(e.message().to_string()))?;
    settings.validate()?;
    Ok(settings)
  }

  /// Apply `PRLINK_GRAPHQL_URL` if set.
  pub fn with_env_overrides(mut self) -> Result<Self> {
    if let Some(url) = std::env::var(ENV_GRAPHQL_URL).ok().filter(|url| !url.is_empty()) {
      debug!(%url, "GraphQL endpoint overridden from environment");
      self.github.graphql_url = url;
    }
    self.validate()?;
    Ok(self)
  }

  fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.github.graphql_url)
      .map_err(|e| PrLinkError::Settings(format!("graphql_url '{}' is invalid: {e}", self.github.graphql_url)))?;

    if !matches!(url.scheme(), "http" | "https") {
      return Err(PrLinkError::Settings(format!(
        "graphql_url '{}' must use http or https",
        self.github.graphql_url
      )));
    }

    if self.github.machine.trim().is_empty() {
      return Err(PrLinkError::Settings("machine must not be empty".to_string()));
    }

    Ok(())
  }
}
