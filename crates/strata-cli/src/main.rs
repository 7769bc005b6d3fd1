use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod opener;
mod utils;
use commands::{cmd_init, cmd_new, cmd_split, cmd_status};

/// strata command-line interface.
#[derive(Parser, Debug)]
#[command(name = "strata", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize strata.json with defaults.
    Init,
    /// Scaffold a new migration file.
    New {
        /// Migration name, e.g. CreateTableUsers.
        name: String,
        /// Do not open the migration file after creation.
        #[arg(short = 's', long)]
        silent: bool,
    },
    /// Split a runner script log into per-migration SQL files.
    Split {
        /// Script log produced by the migration runner in preview mode.
        log: PathBuf,
        /// SQL dialect token (pg, sqlite, sqlserver2016, ...).
        #[arg(short, long)]
        dialect: Option<String>,
        /// Connection string, or the key of a configured one.
        #[arg(short = 'c', long = "connection-string")]
        connection_string: Option<String>,
        /// Do not open the resulting files.
        #[arg(short = 's', long)]
        silent: bool,
    },
    /// Show current project status.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init => cmd_init(),
        Commands::New { name, silent } => cmd_new(name, silent),
        Commands::Split {
            log,
            dialect,
            connection_string,
            silent,
        } => cmd_split(log, dialect.as_deref(), connection_string.as_deref(), silent).await,
        Commands::Status => cmd_status(),
    }
}
