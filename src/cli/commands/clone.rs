//! Clone command implementation

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::cli::prompt::Prompt;
use crate::cli::CliError;
use crate::core::descriptor::RepoDescriptor;
use crate::platform::RepoHost;
use crate::sync::open_snapshot;

/// Options for the clone command
pub struct CloneOptions<'a> {
    /// `owner/repo`
    pub repo: &'a str,
    pub branch: &'a str,
    /// Target directory; defaults to the repository name
    pub directory: Option<&'a str>,
}

/// Split `owner/repo` on the first `/`
pub fn parse_repo_spec(spec: &str) -> Result<(String, String), CliError> {
    match spec.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(CliError::InvalidRepoSpec(spec.to_string())),
    }
}

/// Run the clone command.
///
/// Returns the directory that was populated, or `None` when the user declined
/// to overwrite an existing directory.
pub async fn run_clone(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    prompt: &dyn Prompt,
    opts: CloneOptions<'_>,
) -> anyhow::Result<Option<PathBuf>> {
    if ctx.config.auth_token().is_none() {
        return Err(CliError::NotLoggedIn.into());
    }
    let (owner, repo) = parse_repo_spec(opts.repo)?;

    let spinner = Output::spinner(&format!("Cloning {}/{}...", owner, repo));
    let fetched = async {
        let info = host.repo_info(&owner, &repo).await?;
        let archive = host.download_snapshot(&owner, &repo, opts.branch).await?;
        anyhow::Ok((info, archive))
    }
    .await;
    spinner.finish_and_clear();
    let (info, archive) = fetched.context("Clone failed")?;
    let snapshot = open_snapshot(&archive).context("Clone failed")?;

    let target = ctx.root().join(opts.directory.unwrap_or(repo.as_str()));
    if target.exists() {
        let question = format!("Directory '{}' already exists. Overwrite?", target.display());
        if !prompt.confirm(&question)? {
            Output::warning("Clone cancelled");
            return Ok(None);
        }
        let removed = if target.is_dir() {
            std::fs::remove_dir_all(&target)
        } else {
            std::fs::remove_file(&target)
        };
        removed.with_context(|| format!("Failed to remove {}", target.display()))?;
    }

    let written = snapshot
        .extract_into(&target, |_| false)
        .with_context(|| format!("Failed to extract snapshot into {}", target.display()))?;
    RepoDescriptor::new(&owner, &repo, opts.branch).save(&target)?;
    info!(owner = %owner, repo = %repo, branch = opts.branch, files = written, "cloned");

    Output::success(&format!(
        "Successfully cloned {} to {}",
        Output::repo_name(opts.repo),
        target.display()
    ));
    Output::kv("Branch", &Output::branch_name(opts.branch));
    Output::kv(
        "Description",
        info.description.as_deref().unwrap_or("No description"),
    );

    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_spec() {
        assert_eq!(
            parse_repo_spec("octo/widgets").unwrap(),
            ("octo".to_string(), "widgets".to_string())
        );
        assert_eq!(
            parse_repo_spec("octo/widgets/extra").unwrap(),
            ("octo".to_string(), "widgets/extra".to_string())
        );
    }

    #[test]
    fn test_parse_repo_spec_invalid() {
        for spec in ["widgets", "/widgets", "octo/", ""] {
            assert!(
                matches!(parse_repo_spec(spec), Err(CliError::InvalidRepoSpec(_))),
                "{:?} should be rejected",
                spec
            );
        }
    }
}
