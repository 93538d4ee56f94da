//! wiremock-based mock helpers for the RepoRouge API.
//!
//! Each helper mounts one endpoint with a canned response, allowing fully
//! offline testing of the command handlers.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the mocked login endpoint hands out.
pub const ACCESS_TOKEN: &str = "access-abc";

/// Mount `POST /auth/login` and `POST /auth/cli-token`.
pub async fn mock_login(server: &MockServer, cli_token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer",
            "user": {"username": "alice", "email": "alice@example.com"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/cli-token"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cli_token": cli_token})))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount `POST /auth/login` answering 401.
pub async fn mock_login_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(server)
        .await;
}

/// Mount `GET /api/repos/{owner}/{repo}/info`.
pub async fn mock_repo_info(server: &MockServer, owner: &str, repo: &str, description: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(format!("/api/repos/{}/{}/info", owner, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": repo,
            "owner": owner,
            "description": description,
        })))
        .mount(server)
        .await;
}

/// Mount `GET /api/repos/{owner}/{repo}/clone?branch=...` returning ZIP bytes.
pub async fn mock_snapshot(
    server: &MockServer,
    owner: &str,
    repo: &str,
    branch: &str,
    archive: Vec<u8>,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api/repos/{}/{}/clone", owner, repo)))
        .and(query_param("branch", branch))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(archive),
        )
        .mount(server)
        .await;
}

/// Mount a snapshot endpoint that must never be hit.
pub async fn forbid_snapshot(server: &MockServer, owner: &str, repo: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/repos/{}/{}/clone", owner, repo)))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Mount `GET /repos/{repo}/branches`.
pub async fn mock_branches(server: &MockServer, repo: &str, current: &str, names: &[&str]) {
    let branches: Vec<_> = names.iter().map(|n| json!({"name": n})).collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/branches", repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_branch": current,
            "branches": branches,
        })))
        .mount(server)
        .await;
}

/// Mount `POST /repos/{repo}/branches/{branch}/switch` with the given status.
pub async fn mock_switch(server: &MockServer, repo: &str, branch: &str, status: u16) {
    let body = if status < 400 {
        json!({"message": format!("Switched to branch {}", branch)})
    } else {
        json!({"detail": "Branch not found"})
    };
    Mock::given(method("POST"))
        .and(path(format!("/repos/{}/branches/{}/switch", repo, branch)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount `POST /api/repos/{owner}/{repo}/push?branch=...` reporting `accepted` files.
pub async fn mock_push(server: &MockServer, owner: &str, repo: &str, branch: &str, accepted: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/api/repos/{}/{}/push", owner, repo)))
        .and(query_param("branch", branch))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"files": accepted})))
        .mount(server)
        .await;
}

/// Mount `GET /api/repos/{owner}/{repo}/diff?file_path=...`.
pub async fn mock_diff(server: &MockServer, owner: &str, repo: &str, file: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/repos/{}/{}/diff", owner, repo)))
        .and(query_param("file_path", file))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": file,
            "content": content,
        })))
        .mount(server)
        .await;
}

/// Number of requests the server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or(0)
}
