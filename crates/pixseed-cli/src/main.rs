//! Pixseed CLI - seed a website's placeholder images

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{clean, fetch, list, providers};

#[derive(Parser)]
#[command(name = "pixseed")]
#[command(about = "Populate a directory of placeholder images from stock and AI providers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire all missing catalog assets
    Fetch {
        /// Path to a [[asset]] catalog TOML (defaults to the built-in table)
        #[arg(long)]
        catalog: Option<String>,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output_dir: Option<String>,

        /// Comma-separated provider fallback order override
        #[arg(long)]
        providers: Option<String>,
    },

    /// List catalog assets
    List {
        /// Path to a [[asset]] catalog TOML (defaults to the built-in table)
        #[arg(long)]
        catalog: Option<String>,
    },

    /// Show registered providers and their status
    Providers,

    /// Remove zero-byte leftovers from an interrupted run
    Clean {
        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output_dir: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            catalog,
            output_dir,
            providers,
        } => fetch::run(catalog.as_deref(), output_dir.as_deref(), providers.as_deref()),
        Commands::List { catalog } => list::run(catalog.as_deref()),
        Commands::Providers => providers::run(),
        Commands::Clean { output_dir } => clean::run(output_dir.as_deref()),
    }
}
