//! HTTP server command
//!
//! Runs the stats API over either the seed directory or Postgres documents.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use estatectl_core::EstateConfig;

use estatectl_server::db::{create_pool_with_options, migrations};
use estatectl_server::{run_server, DirectorySource, PgSource, ServerConfig, StatsSource};

use super::{resolve_data_dir, resolve_database_url, resolve_threshold};

/// Where the server reads agents, listings and views from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// JSON/NDJSON files in a seed directory
    Files,
    /// JSONB document tables in Postgres
    Postgres,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: from config, 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Data source
    #[arg(long, value_enum, default_value_t = SourceKind::Files)]
    pub source: SourceKind,

    /// Seed directory (files source)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Database URL (postgres source; overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Default price threshold for requests that don't pass one
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &EstateConfig) -> Result<()> {
    let bind_addr = args.bind.unwrap_or(config.server.bind);
    let price_threshold = resolve_threshold(args.threshold, config)?;

    let source: Arc<dyn StatsSource> = match args.source {
        SourceKind::Files => {
            let dir = resolve_data_dir(args.data_dir, config)?;
            if !dir.is_dir() {
                anyhow::bail!("Data directory not found: {}", dir.display());
            }
            Arc::new(DirectorySource::new(dir))
        }
        SourceKind::Postgres => {
            let database_url = resolve_database_url(args.database_url, config)?;
            let pool = create_pool_with_options(&database_url, config.database.max_connections)
                .await
                .context("Failed to create database pool")?;
            migrations::run(&pool)
                .await
                .context("Failed to prepare document tables")?;
            Arc::new(PgSource::new(pool))
        }
    };

    tracing::info!("Starting estatectl server on {}", bind_addr);

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
        price_threshold,
    };

    // Run server (blocks until shutdown)
    run_server(source, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
