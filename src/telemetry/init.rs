//! Telemetry initialization.
//!
//! Provides configuration and initialization for the tracing subscriber.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default log level
    pub default_level: Level,
    /// Whether to include file and line numbers
    pub include_file_line: bool,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
    /// Custom filter directive (overrides default_level if set)
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    /// Quiet by default: command output goes through `Output`, logs stay at WARN.
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_file_line: false,
            include_target: false,
            ansi_colors: true,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for `--verbose` runs.
    pub fn verbose() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_file_line: true,
            include_target: true,
            ansi_colors: true,
            filter_directive: None,
        }
    }

    /// Pick the configuration for a CLI invocation, honouring `RUST_LOG`.
    pub fn for_cli(verbose: bool) -> Self {
        let mut config = if verbose {
            Self::verbose()
        } else {
            Self::default()
        };
        config.filter_directive = std::env::var("RUST_LOG").ok().filter(|v| !v.is_empty());
        config
    }
}

/// Initialize the global tracing subscriber.
///
/// Logs are written to stderr so they never mix with command output.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = if let Some(ref directive) = config.filter_directive {
        EnvFilter::try_new(directive)?
    } else {
        EnvFilter::default()
            .add_directive(Level::WARN.into())
            .add_directive(format!("reporouge={}", config.default_level).parse()?)
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .compact();

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
