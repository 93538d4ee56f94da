//! reporouge - Git-like client for RepoRouge repositories
//!
//! Talks to the RepoRouge HTTP API to clone, push, pull and switch branches.
//! History, merging and conflict handling all live on the server; this crate
//! only manages local configuration and mirrors snapshots into a working
//! directory.

pub mod cli;
pub mod core;
pub mod platform;
pub mod sync;
pub mod telemetry;

pub use crate::core::config::{ConfigPaths, GlobalConfig};
pub use crate::core::descriptor::RepoDescriptor;
