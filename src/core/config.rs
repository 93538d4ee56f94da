//! Global (per-user) configuration
//!
//! Stored as JSON in `~/.reporouge/config.json` (or `$REPOROUGE_HOME/config.json`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "https://repo-rouge.onrender.com";

/// Environment variable overriding the per-user config directory
pub const HOME_ENV: &str = "REPOROUGE_HOME";

/// Name of the per-user config directory under `$HOME`
const CONFIG_DIR_NAME: &str = ".reporouge";

/// Errors that can occur while persisting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to save configuration")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize configuration")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not determine home directory (set REPOROUGE_HOME)")]
    NoHomeDir,
}

/// Locations of the per-user configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Config directory root
    pub root: PathBuf,
    /// Global config file
    pub config_file: PathBuf,
    /// Reserved cache directory
    pub cache_dir: PathBuf,
}

impl ConfigPaths {
    /// Paths rooted at an explicit directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config.json"),
            cache_dir: root.join("cache"),
            root,
        }
    }

    /// Resolve paths from `$REPOROUGE_HOME`, falling back to `~/.reporouge`
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(root));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(home.join(CONFIG_DIR_NAME)))
    }

    /// Create the config and cache directories if missing
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        Ok(())
    }

    /// Whether a global config file has been written
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global user configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the RepoRouge server
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Long-lived CLI token
    #[serde(default)]
    pub token: Option<String>,
    /// Username the token belongs to
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Written by first-run setup only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_completed: Option<bool>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            token: None,
            username: None,
            email: None,
            setup_completed: None,
        }
    }
}

impl GlobalConfig {
    /// Config written after a successful login, replacing everything else
    pub fn logged_in(server_url: &str, token: &str, username: &str, email: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            token: Some(token.to_string()),
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            setup_completed: None,
        }
    }

    /// Load the global config.
    ///
    /// A missing, unreadable or malformed file yields the default config.
    pub fn load(paths: &ConfigPaths) -> Self {
        Self::load_file(&paths.config_file)
    }

    fn load_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "global config not readable, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "global config is malformed, using defaults");
                Self::default()
            }
        }
    }

    /// Overwrite the global config file
    pub fn save(&self, paths: &ConfigPaths) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&paths.config_file, json)?;
        debug!(path = %paths.config_file.display(), "global config saved");
        Ok(())
    }

    /// Token usable for authenticated calls (empty tokens count as missing)
    pub fn auth_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Create the config directories and, on first run, an initial config file.
///
/// Returns `true` when this invocation created the config.
pub fn first_run_setup(paths: &ConfigPaths) -> Result<bool, ConfigError> {
    paths.ensure_dirs()?;
    if paths.is_initialized() {
        return Ok(false);
    }

    let initial = GlobalConfig {
        setup_completed: Some(true),
        ..GlobalConfig::default()
    };
    initial.save(paths)?;
    Ok(true)
}
