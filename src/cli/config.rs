//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    exists: bool,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| {
                    CliError::io(format!("Failed to resolve configuration path: {e}"))
                })?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let path = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve configuration path: {e}")))?;
    let output = ConfigOutput {
        path: path.to_string_lossy().to_string(),
        exists: Config::exists(),
        config,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("SmartPlanner Configuration");
    println!("==========================");
    println!();

    println!("Board:");
    for column in &config.board.columns {
        println!("  {:<12} {}", column.key, column.title);
    }
    println!("  Settle delay: {} ms", config.board.settle_delay_ms);
    println!();

    println!("Theme:");
    println!(
        "  Sync: {}",
        if config.theme.sync_enabled { "enabled" } else { "disabled" }
    );
    match &config.theme.preferences {
        Some(stored) => {
            let prefs = stored.resolve();
            println!("  Primary color: {}", prefs.primary_color);
            println!("  Font family:   {}", prefs.font_family);
            println!("  Font size:     {}", prefs.font_size);
            println!("  Animations:    {}", prefs.animations_enabled);
        }
        None => println!("  Preferences: (defaults)"),
    }
    println!();
}
