//! Pull command implementation
//!
//! Replaces the working directory contents with the latest snapshot of the
//! current branch.

use anyhow::Context;
use tracing::info;

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::platform::RepoHost;
use crate::sync::{clear_dir, is_descriptor_path, open_snapshot};

/// Run the pull command.
///
/// Returns the number of files written.
pub async fn run_pull(ctx: &CommandContext, host: &dyn RepoHost) -> anyhow::Result<usize> {
    let descriptor = ctx.linked_repo()?;

    let spinner = Output::spinner(&format!(
        "Pulling {} ({})...",
        descriptor.full_name(),
        descriptor.current_branch
    ));
    let archive = host
        .download_snapshot(
            &descriptor.owner,
            &descriptor.repo_name,
            &descriptor.current_branch,
        )
        .await;
    spinner.finish_and_clear();
    let archive = archive.context("Pull failed")?;
    let snapshot = open_snapshot(&archive).context("Pull failed")?;

    clear_dir(ctx.root(), is_descriptor_path)?;
    let written = snapshot.extract_into(ctx.root(), is_descriptor_path)?;
    info!(repo = %descriptor.full_name(), branch = %descriptor.current_branch, files = written, "pulled");

    Output::success("Successfully pulled latest changes");
    Ok(written)
}
