//! Command context passed to command handlers
//!
//! Bundles the per-user config snapshot, its location and the working
//! directory into a single struct. Loaded once in `main()`; handlers never
//! read global state on their own.

use crate::core::config::{ConfigPaths, GlobalConfig};
use crate::core::descriptor::RepoDescriptor;
use crate::platform::{PlatformError, RougeClient};
use std::path::{Path, PathBuf};

use super::CliError;

/// Context available to all command handlers.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Where the global config lives
    pub paths: ConfigPaths,
    /// Global config as loaded at startup
    pub config: GlobalConfig,
    /// Directory commands operate on
    pub work_dir: PathBuf,
}

impl CommandContext {
    /// Load the global config from `paths` and bind it to `work_dir`
    pub fn load(paths: ConfigPaths, work_dir: impl Into<PathBuf>) -> Self {
        let config = GlobalConfig::load(&paths);
        Self {
            paths,
            config,
            work_dir: work_dir.into(),
        }
    }

    /// Get the working directory as a `&Path`
    pub fn root(&self) -> &Path {
        &self.work_dir
    }

    /// Descriptor of the working directory, if it is a cloned repository
    pub fn descriptor(&self) -> Option<RepoDescriptor> {
        RepoDescriptor::load(&self.work_dir)
    }

    /// Descriptor of a working directory whose user is logged in
    pub fn linked_repo(&self) -> Result<RepoDescriptor, CliError> {
        match (self.config.auth_token(), self.descriptor()) {
            (Some(_), Some(descriptor)) => Ok(descriptor),
            _ => Err(CliError::NotInRepositoryOrNotLoggedIn),
        }
    }

    /// Client for the configured server, authenticated when a token is saved
    pub fn connect(&self) -> Result<RougeClient, PlatformError> {
        let client = RougeClient::new(&self.config.server_url)?;
        match self.config.auth_token() {
            Some(token) => client.with_token(token),
            None => Ok(client),
        }
    }
}
