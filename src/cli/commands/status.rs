//! Status command implementation
//!
//! There is no local snapshot to compare against, so every file in the
//! working directory is listed as modified.

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::cli::CliError;
use crate::sync::{is_descriptor_path, to_slash, walk_files};

/// Run the status command.
///
/// Returns the listed paths, `/`-separated and sorted.
pub fn run_status(ctx: &CommandContext) -> anyhow::Result<Vec<String>> {
    let descriptor = ctx.descriptor().ok_or(CliError::NotInRepository)?;

    Output::kv("Repository", &Output::repo_name(&descriptor.full_name()));
    Output::kv("Current branch", &Output::branch_name(&descriptor.current_branch));
    Output::kv("Cloned at", &descriptor.cloned_at.to_rfc3339());

    let files: Vec<String> = walk_files(ctx.root(), is_descriptor_path)
        .iter()
        .map(|path| to_slash(path))
        .collect();

    Output::header("Modified files:");
    for file in &files {
        Output::modified(file);
    }

    Ok(files)
}
