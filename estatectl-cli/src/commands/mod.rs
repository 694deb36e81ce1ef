//! Command implementations for estatectl CLI

pub mod seed;
pub mod serve;
pub mod stats;

// Re-export main dispatcher functions for flat access from main.rs
pub use seed::run_seed;
pub use serve::run_serve;
pub use stats::run_stats;

use std::path::PathBuf;

use anyhow::{Context, Result};
use estatectl_core::config::validate_threshold;
use estatectl_core::EstateConfig;

/// Seed directory from the flag, falling back to config/env.
pub(crate) fn resolve_data_dir(flag: Option<PathBuf>, config: &EstateConfig) -> Result<PathBuf> {
    flag.or_else(|| config.data.dir.clone())
        .context("No data directory. Set via --data-dir, ESTATECTL_DATA_DIR, or [data] dir in config")
}

/// Database URL from the flag, falling back to config/env.
pub(crate) fn resolve_database_url(flag: Option<String>, config: &EstateConfig) -> Result<String> {
    flag.or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or [database] url in config")
}

/// Price threshold from the flag, falling back to config.
pub(crate) fn resolve_threshold(flag: Option<f64>, config: &EstateConfig) -> Result<f64> {
    match flag {
        Some(value) => Ok(validate_threshold(value)?),
        None => Ok(config.stats.price_threshold),
    }
}
