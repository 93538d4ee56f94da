//! Login command implementation

use anyhow::Context;
use tracing::info;

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::cli::prompt::Prompt;
use crate::core::config::GlobalConfig;
use crate::platform::{RepoHost, RougeClient, UserIdentity};

/// Options for the login command
pub struct LoginOptions<'a> {
    /// Prompted for when absent
    pub email: Option<&'a str>,
    /// Prompted for (hidden) when absent
    pub password: Option<&'a str>,
    /// Server to authenticate against; saved as the new server URL
    pub server: &'a str,
}

/// Run the login command.
///
/// Exchanges the short-lived access token for a CLI token and replaces the
/// global config. Nothing is written unless both calls succeed.
pub async fn run_login(
    ctx: &CommandContext,
    prompt: &dyn Prompt,
    opts: LoginOptions<'_>,
) -> anyhow::Result<UserIdentity> {
    let email = match opts.email {
        Some(email) => email.to_string(),
        None => prompt.input("Email")?,
    };
    let password = match opts.password {
        Some(password) => password.to_string(),
        None => prompt.password("Password")?,
    };

    let client = RougeClient::new(opts.server)?;

    let spinner = Output::spinner(&format!("Logging in to {}...", client.base_url()));
    let result = authenticate(client, &email, &password).await;
    spinner.finish_and_clear();
    let (cli_token, user) = result.context("Login failed")?;

    GlobalConfig::logged_in(opts.server, &cli_token, &user.username, &user.email)
        .save(&ctx.paths)?;
    info!(username = %user.username, server = opts.server, "logged in");

    Output::success(&format!("Successfully logged in as {}", user.username));
    Ok(user)
}

async fn authenticate(
    client: RougeClient,
    email: &str,
    password: &str,
) -> anyhow::Result<(String, UserIdentity)> {
    let login = client.login(email, password).await?;
    let client = client.with_token(&login.access_token)?;
    let token = client.issue_cli_token().await?;
    Ok((token.cli_token, login.user))
}
