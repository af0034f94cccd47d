//! Maplewick CLI - catalog seeding and configuration tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the built-in starter catalog to a seed file
//! mw-cli seed -o data/catalog.json
//!
//! # Overwrite an existing seed file
//! mw-cli seed -o data/catalog.json --force
//!
//! # Validate the storefront environment configuration
//! mw-cli check-config
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the built-in starter catalog as a seed file
//! - `check-config` - Load and report the storefront configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mw-cli")]
#[command(author, version, about = "Maplewick CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in starter catalog as a seed file
    Seed {
        /// Output path for the seed file
        #[arg(short, long, default_value = "data/catalog.json")]
        out: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Load and report the storefront configuration
    CheckConfig,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { out, force } => commands::seed::write_seed(&out, force)?,
        Commands::CheckConfig => commands::config::check()?,
    }
    Ok(())
}
