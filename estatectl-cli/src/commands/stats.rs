//! Offline stats: read a seed directory and print the ranking.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use estatectl_core::{AgentStat, Dataset, EstateConfig};
use tracing::info;

use super::{resolve_data_dir, resolve_threshold};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Seed directory holding agents.json, listings.json and views.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Listings priced strictly above this count (default: from config, 300000)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn run_stats(args: StatsArgs, config: &EstateConfig) -> Result<()> {
    let dir = resolve_data_dir(args.data_dir, config)?;
    let threshold = resolve_threshold(args.threshold, config)?;

    let dataset = Dataset::from_dir(&dir)
        .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;
    let stats = dataset.active_agent_stats(threshold);
    info!(dir = %dir.display(), threshold, agents = stats.len(), "computed stats");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => print!("{}", render_table(&stats)),
    }

    Ok(())
}

fn render_table(stats: &[AgentStat]) -> String {
    let width = stats
        .iter()
        .map(|s| s.agent.chars().count())
        .max()
        .unwrap_or(0)
        .max("AGENT".len());

    let mut out = format!("{:<width$}  {:>8}  {:>11}\n", "AGENT", "LISTINGS", "TOTAL VIEWS");
    for stat in stats {
        out.push_str(&format!(
            "{:<width$}  {:>8}  {:>11}\n",
            stat.agent, stat.listings, stat.total_views
        ));
    }
    out
}
