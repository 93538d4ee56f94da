//! reporouge CLI entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use reporouge::cli::commands::clone::CloneOptions;
use reporouge::cli::commands::login::LoginOptions;
use reporouge::cli::{CliError, CommandContext, Output, TerminalPrompt};
use reporouge::core::config::{first_run_setup, ConfigPaths, DEFAULT_SERVER_URL};
use reporouge::platform::PlatformError;
use reporouge::telemetry::{init_telemetry, TelemetryConfig};

#[derive(Parser)]
#[command(name = "reporouge")]
#[command(
    version,
    about = "RepoRouge CLI - A Git-like interface for RepoRouge repositories",
    long_about = None
)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login to RepoRouge
    Login {
        /// Your email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Your password (prompted without echo if omitted)
        #[arg(long)]
        password: Option<String>,
        /// Server URL
        #[arg(long, env = "REPOROUGE_SERVER", default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
    /// Clone a repository
    Clone {
        /// Repository as owner/repo-name
        repo: String,
        /// Branch to clone
        #[arg(long, default_value = "main")]
        branch: String,
        /// Directory to clone into (defaults to the repository name)
        #[arg(long)]
        directory: Option<String>,
    },
    /// Show repository status
    Status,
    /// List branches or show current branch
    Branch {
        /// Show all branches
        #[arg(short, long)]
        all: bool,
    },
    /// Switch to a different branch
    Checkout {
        /// Branch name
        branch_name: String,
    },
    /// Push the working directory to the current branch
    Push {
        /// Commit message (prompted if omitted)
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Pull latest changes from the repository
    Pull,
    /// Show differences between a local file and the server copy
    Diff {
        /// File path relative to the repository root
        file: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_telemetry(&TelemetryConfig::for_cli(cli.verbose)) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    // Commands may block on prompts, so the interrupt watcher runs as its own task.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n👋 Goodbye!");
            std::process::exit(0);
        }
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = ConfigPaths::resolve()?;
    if first_run_setup(&paths).context("Failed to initialize configuration")? {
        print_welcome(&paths);
    }

    let ctx = CommandContext::load(paths, std::env::current_dir()?);
    let prompt = TerminalPrompt;

    match cli.command {
        Some(Commands::Login {
            email,
            password,
            server,
        }) => {
            reporouge::cli::commands::login::run_login(
                &ctx,
                &prompt,
                LoginOptions {
                    email: email.as_deref(),
                    password: password.as_deref(),
                    server: &server,
                },
            )
            .await?;
        }
        Some(Commands::Clone {
            repo,
            branch,
            directory,
        }) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::clone::run_clone(
                &ctx,
                &host,
                &prompt,
                CloneOptions {
                    repo: &repo,
                    branch: &branch,
                    directory: directory.as_deref(),
                },
            )
            .await?;
        }
        Some(Commands::Status) => {
            reporouge::cli::commands::status::run_status(&ctx)?;
        }
        Some(Commands::Branch { all }) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::branch::run_branch(&ctx, &host, all).await?;
        }
        Some(Commands::Checkout { branch_name }) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::checkout::run_checkout(&ctx, &host, &branch_name).await?;
        }
        Some(Commands::Push { message }) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::push::run_push(&ctx, &host, &prompt, message.as_deref())
                .await?;
        }
        Some(Commands::Pull) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::pull::run_pull(&ctx, &host).await?;
        }
        Some(Commands::Diff { file }) => {
            let host = ctx.connect()?;
            reporouge::cli::commands::diff::run_diff(&ctx, &host, &file).await?;
        }
        None => {
            println!("reporouge - Git-like client for RepoRouge repositories");
            println!("Run 'reporouge --help' for usage");
        }
    }

    Ok(())
}

fn print_welcome(paths: &ConfigPaths) {
    println!("🚀 Welcome to RepoRouge CLI!");
    println!("This appears to be your first time running the CLI.");
    println!(
        "Configuration directory created at: {}",
        paths.root.display()
    );
    println!("💡 To get started:");
    println!("1. Run 'reporouge login' to authenticate");
    println!("2. Run 'reporouge clone owner/repo-name' to clone a repository");
    println!("3. Use 'reporouge --help' to see all available commands");
    println!();
}

/// Known failures print their message; anything else gets the generic notice.
fn report_error(err: &anyhow::Error) {
    let known = err.downcast_ref::<CliError>().is_some()
        || err.downcast_ref::<PlatformError>().is_some();

    if known {
        Output::error(&format!("{:#}", err));
    } else {
        Output::error(&format!("An unexpected error occurred: {:#}", err));
        eprintln!("Please report this issue if it persists.");
    }
}
