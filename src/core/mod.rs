//! Core state for reporouge
//!
//! Per-user configuration and the per-working-directory repository descriptor.

pub mod config;
pub mod descriptor;

pub use config::{ConfigError, ConfigPaths, GlobalConfig};
pub use descriptor::RepoDescriptor;
