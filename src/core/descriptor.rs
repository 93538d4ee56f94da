//! Local repository descriptor
//!
//! Binds a working directory to a remote `owner/repo` and branch. Lives in
//! `<working dir>/.reporouge/config.json`.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::config::ConfigError;

/// Hidden directory inside every working directory
pub const DESCRIPTOR_DIR: &str = ".reporouge";

/// Descriptor file name inside [`DESCRIPTOR_DIR`]
pub const DESCRIPTOR_FILE: &str = "config.json";

/// Repository descriptor stored in a working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub owner: String,
    pub repo_name: String,
    pub current_branch: String,
    /// When the working directory was cloned
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub cloned_at: DateTime<Local>,
}

/// Accept RFC 3339 timestamps as well as offset-less ISO timestamps (local time).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(serde::de::Error::custom)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| serde::de::Error::custom(format!("invalid local time: {}", raw)))
}

impl RepoDescriptor {
    /// Descriptor for a fresh clone, stamped with the current time
    pub fn new(owner: &str, repo_name: &str, branch: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo_name: repo_name.to_string(),
            current_branch: branch.to_string(),
            cloned_at: Local::now(),
        }
    }

    /// Path of the descriptor file for a working directory
    pub fn path_in(work_dir: &Path) -> PathBuf {
        work_dir.join(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE)
    }

    /// Load the descriptor of a working directory.
    ///
    /// Returns `None` when the file is absent or cannot be parsed.
    pub fn load(work_dir: &Path) -> Option<Self> {
        let path = Self::path_in(work_dir);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "repository descriptor is malformed");
                None
            }
        }
    }

    /// Write the descriptor into a working directory
    pub fn save(&self, work_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path_in(work_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), branch = %self.current_branch, "descriptor saved");
        Ok(())
    }

    /// Same repository, pointed at another branch
    pub fn on_branch(&self, branch: &str) -> Self {
        Self {
            current_branch: branch.to_string(),
            ..self.clone()
        }
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }
}
