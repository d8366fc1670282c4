//! Command-line interface for the news hub
//!
//! Every subcommand drives the same controller the window uses, so the
//! labels, error messages and empty-state text match what the window shows.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// Current Affairs Hub - global, India and state news for exam preparation
#[derive(Parser, Debug)]
#[command(name = "affairs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format and backend selection
    #[command(flatten)]
    pub output: OutputOptions,

    /// Omit to open the window
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options accepted by every subcommand
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Backend origin, overriding AFFAIRS_BACKEND_URL and the config file
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read, search and refresh news feeds
    News {
        #[command(subcommand)]
        command: commands::news::NewsCommands,
    },

    /// States and their districts
    States {
        #[command(subcommand)]
        command: commands::states::StatesCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Diagnostics and debugging
    Diag {
        #[command(subcommand)]
        command: commands::diag::DiagCommands,
    },

    /// Interactive shell with history and completion
    Shell,
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Shell) => shell::run(cli.output).await,
        Some(command) => dispatch(command, &cli.output).await,
        None => Ok(()),
    }
}

/// Run one non-shell command
async fn dispatch(command: Commands, options: &OutputOptions) -> anyhow::Result<()> {
    let format = options.format();
    let quiet = options.quiet;
    let backend = options.backend.as_deref();

    match command {
        Commands::News { command } => commands::news::run(command, format, quiet, backend).await,
        Commands::States { command } => {
            commands::states::run(command, format, quiet, backend).await
        }
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
        Commands::Diag { command } => commands::diag::run(command, format, backend).await,
        Commands::Shell => anyhow::bail!("Already in shell mode."),
    }
}
