//! Command-line interface for mlss
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and maps every failure to exit code 1.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::sync::SyncDirection;

mod commands;
mod output;

pub use output::Output;

/// Minecraft Local Save Sync (MLSS)
#[derive(Parser)]
#[command(name = "mlss", author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Local saves directory to use instead of the launcher default
    #[arg(long, value_name = "DIR", env = "MLSS_SAVES_DIR", global = true)]
    pub saves_dir: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Push saves from the local Minecraft directory to the backup directory
    Push(SyncArgs),
    /// Pull saves from the backup directory to the local Minecraft directory
    Pull(SyncArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Options shared by push and pull
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// The target backup directory (e.g., a cloud or network drive)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Sync only this save; the config file's save list is ignored
    #[arg(short, long, value_name = "NAME")]
    pub save: Option<String>,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Copy named saves in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommands {
    /// Show the configuration file as mlss reads it
    Show,
    /// Check that the configuration file parses
    Validate,
}

impl Cli {
    /// Execute the CLI command and map the outcome to an exit code
    pub fn run(self) -> ExitCode {
        let output = Output::new(self.verbose > 0, self.quiet);
        setup_logging(self.verbose, self.quiet);

        match self.dispatch(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                output.error(&format!("{err:#}"));
                ExitCode::FAILURE
            }
        }
    }

    fn dispatch(&self, output: &Output) -> Result<()> {
        match &self.command {
            Some(Commands::Push(args)) => commands::sync::execute(SyncDirection::Push, args, self, output),
            Some(Commands::Pull(args)) => commands::sync::execute(SyncDirection::Pull, args, self, output),
            Some(Commands::Config(cmd)) => commands::config::execute(*cmd, self, output),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
