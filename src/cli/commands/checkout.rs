//! Checkout command implementation

use anyhow::Context;
use tracing::info;

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::core::descriptor::RepoDescriptor;
use crate::platform::RepoHost;
use crate::sync::{clear_dir, is_descriptor_path, open_snapshot, Snapshot};

/// Run the checkout command.
///
/// The server switch happens first; if it fails the descriptor and the
/// working directory are left untouched. The working directory is only
/// cleared once the new snapshot has been opened.
pub async fn run_checkout(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    branch_name: &str,
) -> anyhow::Result<()> {
    let descriptor = ctx.linked_repo()?;

    let spinner = Output::spinner(&format!("Switching to {}...", branch_name));
    let fetched = switch_and_fetch(ctx, host, &descriptor, branch_name).await;
    spinner.finish_and_clear();
    let snapshot = fetched.context("Checkout failed")?;

    clear_dir(ctx.root(), is_descriptor_path)?;
    snapshot.extract_into(ctx.root(), is_descriptor_path)?;

    Output::success(&format!(
        "Switched to branch '{}'",
        Output::branch_name(branch_name)
    ));
    Ok(())
}

/// Switch on the server, record the new branch locally, then download and open it
async fn switch_and_fetch(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    descriptor: &RepoDescriptor,
    branch_name: &str,
) -> anyhow::Result<Snapshot> {
    let (owner, repo) = (&descriptor.owner, &descriptor.repo_name);

    host.switch_branch(owner, repo, branch_name).await?;
    descriptor.on_branch(branch_name).save(ctx.root())?;
    info!(
        repo = %descriptor.full_name(),
        from = %descriptor.current_branch,
        to = branch_name,
        "branch switched"
    );

    let bytes = host.download_snapshot(owner, repo, branch_name).await?;
    Ok(open_snapshot(&bytes)?)
}
