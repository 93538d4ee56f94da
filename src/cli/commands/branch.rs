//! Branch command implementation

use anyhow::Context;

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::platform::{BranchList, RepoHost};

/// Run the branch command
pub async fn run_branch(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    show_all: bool,
) -> anyhow::Result<BranchList> {
    let descriptor = ctx.linked_repo()?;

    let branches = host
        .list_branches(&descriptor.owner, &descriptor.repo_name)
        .await
        .context("Failed to get branches")?;

    if show_all {
        Output::header("All branches:");
        for branch in &branches.branches {
            Output::branch_item(&branch.name, branch.name == branches.current_branch);
        }
    } else {
        Output::kv("Current branch", &Output::branch_name(&branches.current_branch));
    }

    Ok(branches)
}
