//! CLI output formatting
//!
//! Provides colored output, spinners, and formatting utilities.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output helper for consistent CLI formatting
pub struct Output;

impl Output {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!("\n{}", message.bold());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("{}: {}", key.dimmed(), value);
    }

    /// Print a file reported by `status`
    pub fn modified(path: &str) {
        println!("  {} {}", "M".yellow(), path);
    }

    /// Print a branch list entry, marking the current one
    pub fn branch_item(name: &str, current: bool) {
        if current {
            println!("* {}", Self::branch_name(name).bold());
        } else {
            println!("  {}", name);
        }
    }

    /// Print a diff header line
    pub fn diff_header(line: &str) {
        println!("{}", line.bold());
    }

    /// Print a diff hunk marker
    pub fn diff_hunk(line: &str) {
        println!("{}", line.cyan());
    }

    /// Print a diff addition
    pub fn diff_add(line: &str) {
        println!("{}", format!("+{}", line).green());
    }

    /// Print a diff deletion
    pub fn diff_del(line: &str) {
        println!("{}", format!("-{}", line).red());
    }

    /// Print an unchanged diff line
    pub fn diff_context(line: &str) {
        println!(" {}", line);
    }

    /// Create a spinner with a message
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded template must be valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Format a repo name consistently
    pub fn repo_name(name: &str) -> String {
        name.cyan().bold().to_string()
    }

    /// Format a branch name consistently
    pub fn branch_name(name: &str) -> String {
        name.magenta().to_string()
    }
}
