//! Push command implementation
//!
//! Uploads every text file of the working directory in a single request.
//! There is no staging: the full file set is sent each time.

use anyhow::Context;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::context::CommandContext;
use crate::cli::output::Output;
use crate::cli::prompt::Prompt;
use crate::platform::{PushFile, RepoHost};
use crate::sync::{is_descriptor_path, to_slash, walk_files};

/// Collect the push payload for a working directory.
///
/// Files that are not valid UTF-8 or cannot be read are skipped.
pub fn collect_files(root: &Path, message: &str) -> Vec<PushFile> {
    walk_files(root, is_descriptor_path)
        .into_iter()
        .filter_map(|relative| match std::fs::read_to_string(root.join(&relative)) {
            Ok(content) => Some(PushFile {
                path: to_slash(&relative),
                content,
                message: message.to_string(),
            }),
            Err(e) => {
                debug!(path = %relative.display(), error = %e, "skipping file");
                None
            }
        })
        .collect()
}

/// Run the push command.
///
/// Returns the number of files the server accepted (zero when nothing was
/// sent).
pub async fn run_push(
    ctx: &CommandContext,
    host: &dyn RepoHost,
    prompt: &dyn Prompt,
    message: Option<&str>,
) -> anyhow::Result<u64> {
    let descriptor = ctx.linked_repo()?;

    let message = match message {
        Some(m) => m.to_string(),
        None => prompt.input("Commit message")?,
    };

    let files = collect_files(ctx.root(), &message);
    if files.is_empty() {
        Output::info("No files to push");
        return Ok(0);
    }

    let spinner = Output::spinner(&format!(
        "Pushing {} files to {} ({})...",
        files.len(),
        descriptor.full_name(),
        descriptor.current_branch
    ));
    let result = host
        .push_files(
            &descriptor.owner,
            &descriptor.repo_name,
            &files,
            &descriptor.current_branch,
        )
        .await;
    spinner.finish_and_clear();
    let result = result.context("Push failed")?;
    info!(repo = %descriptor.full_name(), sent = files.len(), accepted = result.files, "pushed");

    Output::success(&format!("Successfully pushed {} files", result.files));
    Ok(result.files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_skips_binary_and_descriptor() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".reporouge")).unwrap();
        fs::write(root.join(".reporouge/config.json"), "{}").unwrap();
        fs::write(root.join("image.bin"), b"\xff\xfe\x00\x80").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();

        let files = collect_files(root, "msg");
        assert_eq!(
            files,
            vec![PushFile {
                path: "src/main.rs".to_string(),
                content: "fn main() {}\n".to_string(),
                message: "msg".to_string(),
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let secret = root.join("secret.txt");
        fs::write(&secret, "hidden").unwrap();
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
        fs::write(root.join("open.txt"), "visible").unwrap();

        let files = collect_files(root, "msg");
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        // root can read anything, so only require the readable file to be present
        assert!(paths.contains(&"open.txt"));
        if fs::read_to_string(&secret).is_err() {
            assert!(!paths.contains(&"secret.txt"));
        }
    }
}
