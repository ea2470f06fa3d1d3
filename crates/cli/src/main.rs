//! Cpres CLI - resolve transaction counterparties from the command line
//!
//! Usage:
//! ```bash
//! cpres init
//! cpres load fixtures/sample.json
//! cpres resolve FT FT2401500123
//! cpres resolve FX FX2401500001AB --format json
//! cpres batch references.txt --format legacy
//! cpres status
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cpres_core::ResolverConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod db;

use commands::{load, resolve};

/// Cpres - transaction-counterparty resolution over a tiered record store
#[derive(Parser)]
#[command(name = "cpres")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/cpres.db", global = true)]
    pub db: PathBuf,

    /// Resolver configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database with schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Load transaction records and customers from a JSON fixture
    Load {
        /// Fixture file path
        file: PathBuf,
    },

    /// Resolve the counterparty of one transaction
    Resolve {
        /// Subsystem tag (FT, FX, MM, PP, TT)
        tag: String,
        /// Transaction reference
        reference: String,
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve every `TAG REFERENCE` line of a file, one after another
    Batch {
        /// Input file path
        file: PathBuf,
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show database status
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Outcome and name, human readable
    Text,
    /// Flat string only, as returned to platform callers
    Legacy,
    /// Tagged JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ResolverConfig::load_file(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => ResolverConfig::default(),
    };

    db::ensure_data_dir(&cli.db)?;

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Load { file } => {
            load::run(&cli.db, &file).await?;
        }

        Commands::Resolve {
            tag,
            reference,
            format,
        } => {
            resolve::run_single(&cli.db, config, &tag, &reference, format).await?;
        }

        Commands::Batch { file, format } => {
            resolve::run_batch(&cli.db, config, &file, format).await?;
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }
    }

    Ok(())
}
