//! Diff command implementation
//!
//! Fetches the server copy of a file on the current branch and prints a
//! unified diff against the working directory copy.

use anyhow::Context;
use similar::{ChangeTag, TextDiff};
use std::io::ErrorKind;
use std::path::{Component, Path};

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::cli::CliError;
use crate::platform::RepoHost;
use crate::sync::to_slash;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 3;

/// Run the diff command.
///
/// Returns `true` when the local file differs from the server copy.
pub async fn run_diff(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    file: &str,
) -> anyhow::Result<bool> {
    let descriptor = ctx.linked_repo()?;
    let path = repo_relative(file)?;

    let local = match std::fs::read_to_string(ctx.root().join(&path)) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("Cannot read {} as text", path)),
    };

    let remote = host
        .file_diff(
            &descriptor.owner,
            &descriptor.repo_name,
            &path,
            &descriptor.current_branch,
        )
        .await
        .context("Failed to fetch file for diff")?
        .content
        .unwrap_or_default();

    if remote == local {
        Output::info(&format!("No differences in {}", path));
        return Ok(false);
    }

    print_unified(&path, &descriptor.current_branch, &remote, &local);
    Ok(true)
}

/// Normalise a user-supplied path to a `/`-separated repository path.
///
/// Only plain components (and `.`) are accepted.
fn repo_relative(file: &str) -> Result<String, CliError> {
    let relative = Path::new(file);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    let path = to_slash(relative);
    if !plain || path.is_empty() {
        return Err(CliError::InvalidPath(file.to_string()));
    }
    Ok(path)
}

fn print_unified(path: &str, branch: &str, remote: &str, local: &str) {
    let diff = TextDiff::from_lines(remote, local);

    Output::diff_header(&format!("--- a/{} ({})", path, branch));
    Output::diff_header(&format!("+++ b/{} (local)", path));

    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES);
    for hunk in unified.iter_hunks() {
        Output::diff_hunk(&hunk.header().to_string());
        for change in hunk.iter_changes() {
            let line = change.value().trim_end_matches(['\r', '\n']);
            match change.tag() {
                ChangeTag::Delete => Output::diff_del(line),
                ChangeTag::Insert => Output::diff_add(line),
                ChangeTag::Equal => Output::diff_context(line),
            }
        }
    }
}
