//! RepoRouge HTTP API adapter

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;

use super::traits::{PlatformError, RepoHost};
use super::types::*;

/// RepoRouge API client.
///
/// Holds one HTTP client for the whole invocation. Once a token is known it
/// is attached to every request as a default `Authorization: Bearer` header.
pub struct RougeClient {
    base_url: String,
    http_client: Client,
}

impl RougeClient {
    /// Create an unauthenticated client
    pub fn new(base_url: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: build_client(None)?,
        })
    }

    /// Same client with a bearer token attached to all further requests
    pub fn with_token(self, token: &str) -> Result<Self, PlatformError> {
        Ok(Self {
            http_client: build_client(Some(token))?,
            base_url: self.base_url,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, PlatformError> {
        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| PlatformError::NetworkError(e.to_string()))?;

        let status = response.status();
        debug!(
            endpoint,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "RepoRouge request complete"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::AuthError {
                status: status.as_u16(),
                body,
            },
            StatusCode::NOT_FOUND => PlatformError::NotFound(format!("{} ({})", endpoint, body)),
            _ => PlatformError::ApiError {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, PlatformError> {
        self.send(request, endpoint)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::ParseError(e.to_string()))
    }
}

fn build_client(token: Option<&str>) -> Result<Client, PlatformError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| PlatformError::InvalidConfig(format!("Invalid token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .default_headers(headers)
        .user_agent(concat!("reporouge/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PlatformError::InvalidConfig(format!("Failed to create client: {}", e)))
}

/// Percent-encode a single path segment
fn seg(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl RepoHost for RougeClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PlatformError> {
        let endpoint = "/auth/login";
        let request = self
            .http_client
            .post(self.url(endpoint))
            .json(&LoginRequest { email, password });
        self.send_json(request, endpoint).await
    }

    async fn issue_cli_token(&self) -> Result<CliToken, PlatformError> {
        let endpoint = "/auth/cli-token";
        let request = self.http_client.post(self.url(endpoint));
        self.send_json(request, endpoint).await
    }

    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo, PlatformError> {
        let endpoint = format!("/api/repos/{}/{}/info", seg(owner), seg(repo));
        let request = self.http_client.get(self.url(&endpoint));
        self.send_json(request, &endpoint).await
    }

    async fn download_snapshot(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<u8>, PlatformError> {
        let endpoint = format!("/api/repos/{}/{}/clone", seg(owner), seg(repo));
        let request = self
            .http_client
            .get(self.url(&endpoint))
            .query(&[("branch", branch)]);

        let bytes = self
            .send(request, &endpoint)
            .await?
            .bytes()
            .await
            .map_err(|e| PlatformError::NetworkError(e.to_string()))?;
        debug!(owner, repo, branch, size = bytes.len(), "snapshot downloaded");
        Ok(bytes.to_vec())
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> Result<BranchList, PlatformError> {
        // Branch routes are keyed by repository name only
        let endpoint = format!("/repos/{}/branches", seg(repo));
        debug!(owner, repo, "listing branches");
        let request = self.http_client.get(self.url(&endpoint));
        self.send_json(request, &endpoint).await
    }

    async fn switch_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<serde_json::Value, PlatformError> {
        let endpoint = format!("/repos/{}/branches/{}/switch", seg(repo), seg(branch));
        debug!(owner, repo, branch, "switching server branch");
        let request = self.http_client.post(self.url(&endpoint));
        self.send_json(request, &endpoint).await
    }

    async fn push_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[PushFile],
        branch: &str,
    ) -> Result<PushResult, PlatformError> {
        let endpoint = format!("/api/repos/{}/{}/push", seg(owner), seg(repo));
        let request = self
            .http_client
            .post(self.url(&endpoint))
            .query(&[("branch", branch)])
            .json(files);
        self.send_json(request, &endpoint).await
    }

    async fn file_diff(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileDiff, PlatformError> {
        let endpoint = format!("/api/repos/{}/{}/diff", seg(owner), seg(repo));
        let request = self
            .http_client
            .get(self.url(&endpoint))
            .query(&[("file_path", path), ("branch", branch)]);
        self.send_json(request, &endpoint).await
    }
}
