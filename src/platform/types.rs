//! Request and response bodies of the RepoRouge API

use serde::{Deserialize, Serialize};

/// `POST /auth/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    pub email: String,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Short-lived access token, only used to request a CLI token
    pub access_token: String,
    pub user: UserIdentity,
}

/// `POST /auth/cli-token` response
#[derive(Debug, Clone, Deserialize)]
pub struct CliToken {
    pub cli_token: String,
}

/// Repository metadata (display only)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoInfo {
    #[serde(default)]
    pub description: Option<String>,
}

/// A single branch entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branch {
    pub name: String,
}

/// `GET /repos/{repo}/branches` response
#[derive(Debug, Clone, Deserialize)]
pub struct BranchList {
    pub current_branch: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// One file in a push request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushFile {
    /// Path relative to the working directory root, `/`-separated
    pub path: String,
    pub content: String,
    pub message: String,
}

/// `POST /api/repos/{owner}/{repo}/push` response
#[derive(Debug, Clone, Deserialize)]
pub struct PushResult {
    /// Number of files the server accepted
    pub files: u64,
}

/// `GET /api/repos/{owner}/{repo}/diff` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDiff {
    /// Server copy of the file; `None` when it does not exist on the branch
    #[serde(default)]
    pub content: Option<String>,
}
