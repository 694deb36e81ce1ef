//! Load a seed directory into Postgres.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use estatectl_core::{Dataset, EstateConfig};

use estatectl_server::db::{create_pool_with_options, migrations, DocumentRepo};

use super::{resolve_data_dir, resolve_database_url};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Seed directory holding agents.json, listings.json and views.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs, config: &EstateConfig) -> Result<()> {
    let dir = resolve_data_dir(args.data_dir, config)?;
    let database_url = resolve_database_url(args.database_url, config)?;

    // Validate every document before touching the database
    let dataset = Dataset::from_dir(&dir)
        .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;

    let pool = create_pool_with_options(&database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to prepare document tables")?;

    let report = DocumentRepo::new(&pool)
        .load_dataset(&dataset)
        .await
        .context("Failed to load documents")?;

    println!(
        "Seeded {} agents, {} listings, {} views ({} previous views replaced)",
        report.agents, report.listings, report.views, report.views_replaced
    );

    Ok(())
}
