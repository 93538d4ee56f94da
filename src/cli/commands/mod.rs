//! CLI command implementations
//!
//! Each command is implemented in its own module.

pub mod branch;
pub mod checkout;
pub mod clone;
pub mod diff;
pub mod login;
pub mod pull;
pub mod push;
pub mod status;
