//! Logging for reporouge.
//!
//! Structured logging via the `tracing` crate.
//!
//! # Feature Flags
//!
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;

pub use init::{init_telemetry, TelemetryConfig};
