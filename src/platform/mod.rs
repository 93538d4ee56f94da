//! Repository host adapters
//!
//! The RepoRouge server is the only supported host; the [`RepoHost`] trait
//! keeps command handlers independent of the HTTP client.

pub mod rouge;
pub mod traits;
pub mod types;

pub use rouge::RougeClient;
pub use traits::{PlatformError, RepoHost};
pub use types::{
    Branch, BranchList, CliToken, FileDiff, LoginResponse, PushFile, PushResult, RepoInfo,
    UserIdentity,
};
