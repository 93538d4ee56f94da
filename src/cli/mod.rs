//! CLI layer
//!
//! Command handlers plus the pieces they share: context, output and prompts.

pub mod commands;
pub mod context;
pub mod output;
pub mod prompt;

pub use context::CommandContext;
pub use output::Output;
pub use prompt::{Prompt, TerminalPrompt};

use thiserror::Error;

/// Precondition failures reported to the user with a remediation hint.
///
/// Commands return these before touching the network or the filesystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("Please login first using 'reporouge login'")]
    NotLoggedIn,

    #[error("Not in a RepoRouge repository")]
    NotInRepository,

    #[error("Not in a RepoRouge repository or not logged in")]
    NotInRepositoryOrNotLoggedIn,

    #[error("Invalid repository URL '{0}'. Use format: owner/repo-name")]
    InvalidRepoSpec(String),

    #[error("Invalid path '{0}'. Use a path inside the repository, relative to its root")]
    InvalidPath(String),
}
