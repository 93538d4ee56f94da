//! Repository host trait definition

use async_trait::async_trait;
use thiserror::Error;

use super::types::*;

/// Errors that can occur while talking to the repository host
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Authentication failed ({status}): {body}")]
    AuthError { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Operations the CLI needs from a RepoRouge server.
///
/// Every method is a single request/response; failures are never retried.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Base URL requests are sent to
    fn base_url(&self) -> &str;

    /// Exchange email and password for a short-lived access token
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PlatformError>;

    /// Request a long-lived CLI token for the current bearer token
    async fn issue_cli_token(&self) -> Result<CliToken, PlatformError>;

    /// Repository metadata
    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo, PlatformError>;

    /// Download a ZIP snapshot of a branch
    async fn download_snapshot(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<u8>, PlatformError>;

    /// Current branch and all branches of a repository
    async fn list_branches(&self, owner: &str, repo: &str) -> Result<BranchList, PlatformError>;

    /// Move the server-side branch pointer
    async fn switch_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<serde_json::Value, PlatformError>;

    /// Upload a full file set to a branch
    async fn push_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[PushFile],
        branch: &str,
    ) -> Result<PushResult, PlatformError>;

    /// Server copy of a single file for diffing
    async fn file_diff(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileDiff, PlatformError>;
}
