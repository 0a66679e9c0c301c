//! HEXGRID CLI - Command-line interface
//!
//! Commands:
//! - console: Edit a grid from a line-oriented console
//! - serve: Start the HTTP front end
//! - init-config: Write a grid configuration file with default values

mod console;
mod grid_args;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexgrid_core::GridConfig;

#[derive(Parser)]
#[command(name = "hexgrid")]
#[command(about = "Hex tile grid editor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a grid interactively (or from a script)
    Console(console::ConsoleArgs),
    /// Start the HTTP front end
    Serve(server::ServerArgs),
    /// Write a default grid configuration file
    InitConfig {
        /// Destination JSON file
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging (stderr keeps the console's stdout clean)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Console(args) => console::run(args),
        Commands::Serve(args) => server::run(args),
        Commands::InitConfig { path } => {
            GridConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            tracing::info!("Wrote default grid config to {}", path.display());
            Ok(())
        }
    }
}
