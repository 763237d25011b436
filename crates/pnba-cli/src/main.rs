//! PNBA CLI - Shortest paths over network files

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, config as config_cmd, search};
use config::{config_file_path, Config};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "pnba")]
#[command(author, version, about = "Parallel bidirectional shortest path search")]
pub struct Cli {
    /// Config file (default: ~/.pnba/config.toml)
    #[arg(long, env = "PNBA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json (default: from config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        config_file_path(self.config.as_deref())
    }

    /// Output format from the command line, falling back to the config file
    pub fn output_format(&self, config: &Config) -> anyhow::Result<OutputFormat> {
        match &self.format {
            Some(format) => format.parse(),
            None => Ok(config.format),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the shortest path between two nodes
    Search(search::SearchArgs),
    /// Validate a network file
    Check(check::CheckArgs),
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting pnba CLI");

    match &cli.command {
        Commands::Search(args) => search::run(args, &cli).await?,
        Commands::Check(args) => check::run(args, &cli).await?,
        Commands::Config(args) => config_cmd::run(args, &cli).await?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
