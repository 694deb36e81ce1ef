//! estatectl CLI - active agent statistics over listing documents
//!
//! Subcommands:
//! - `stats`: compute the ranking from a seed directory and print it
//! - `serve`: run the HTTP API (seed directory or Postgres documents)
//! - `seed`: load a seed directory into Postgres

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estatectl_core::EstateConfig;
use tracing::debug;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "estatectl",
    author,
    version,
    about = "Active agent statistics for real-estate listings",
    long_about = "Rank active agents by the views their high-value listings collected. \
                  Works offline from a seed directory or as an HTTP service."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.estatectl/config.toml)
    #[arg(long, global = true, env = "ESTATECTL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute active agent stats from a seed directory
    Stats(commands::stats::StatsArgs),
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Load a seed directory into the Postgres document tables
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env comes first so RUST_LOG set there reaches the filter.
    // dotenvy doesn't overwrite variables that are already set.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match dotenv {
        Ok(path) => debug!("Loaded .env from {}", path.display()),
        Err(_) => debug!("No .env file found, using environment only"),
    }

    let config =
        EstateConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Stats(args) => commands::run_stats(args, &config)?,
        Commands::Serve(args) => commands::run_serve(args, &config).await?,
        Commands::Seed(args) => commands::run_seed(args, &config).await?,
    }

    Ok(())
}
