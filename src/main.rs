//! SmartPlanner - board and theme tooling
//!
//! Headless access to the SmartPlanner board rules (moving tasks between
//! columns) and theme preferences (inspecting and changing them).

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartplanner::cli::{BoardArgs, CliError, ConfigArgs, ExitCode, ThemeArgs};
use smartplanner::constants::{APP_BINARY_NAME, APP_NAME};

/// SmartPlanner - Kanban board and theme preference tooling
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or change theme preferences
    Theme(ThemeArgs),
    /// Move tasks between board columns
    Board(BoardArgs),
    /// Show configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Theme(args) => args.execute().await,
        Commands::Board(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(CliError { exit_code, message }) = result {
        eprintln!("{APP_NAME}: {message}");
        std::process::exit(exit_code.code());
    }
    std::process::exit(ExitCode::Success.code());
}
