//! stack-status CLI

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stack-status",
    version,
    about = "Review and CI status for stacked pull requests"
)]
struct Cli {
    /// Path to config file (default: <config dir>/stack-status/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show CI and review status for every PR in a stack
    Status {
        /// PR number carrying the stack footer (usually the top of the stack)
        pr: u64,

        /// Repository as owner/name or a remote URL
        #[arg(short, long)]
        repo: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check GitHub authentication
    Auth,
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "warn,stack_status=debug",
        _ => "warn,stack_status=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (result, json) = match cli.command {
        Commands::Status { pr, repo, json } => {
            let options = cli::StatusOptions { json };
            (
                cli::run_status(pr, repo.as_deref(), cli.config.as_deref(), options).await,
                json,
            )
        }
        Commands::Auth => (cli::run_auth(cli.config.as_deref()).await, false),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_error(&e, json);
            cli::exit_code(&e)
        }
    }
}
