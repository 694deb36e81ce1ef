//! Seed datasets: the three collections read from a directory of JSON files.
//!
//! Layout:
//!
//! ```text
//! <dir>/agents.json
//! <dir>/listings.json
//! <dir>/views.json
//! ```
//!
//! Each file holds either a JSON array of documents or NDJSON (one document
//! per line). The format is picked from the first non-whitespace byte.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{EstateError, Result};
use crate::records::{from_documents, Agent, AgentStat, Document, Listing, ViewRecord};
use crate::stats::compute_active_agent_stats;

/// A fully materialized snapshot of agents, listings and views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub agents: Vec<Agent>,
    pub listings: Vec<Listing>,
    pub views: Vec<ViewRecord>,
}

impl Dataset {
    /// Load all three collections from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(EstateError::path_not_found(dir));
        }

        let dataset = Self {
            agents: read_collection(dir)?,
            listings: read_collection(dir)?,
            views: read_collection(dir)?,
        };

        debug!(
            dir = %dir.display(),
            agents = dataset.agents.len(),
            listings = dataset.listings.len(),
            views = dataset.views.len(),
            "loaded dataset"
        );

        Ok(dataset)
    }

    /// Run the statistics engine over this snapshot.
    pub fn active_agent_stats(&self, price_threshold: f64) -> Vec<AgentStat> {
        compute_active_agent_stats(&self.agents, &self.listings, &self.views, price_threshold)
    }
}

/// File name holding a collection inside a dataset directory.
pub fn collection_file<T: Document>() -> String {
    format!("{}.json", T::COLLECTION)
}

/// Read and map one collection file from a dataset directory.
pub fn read_collection<T: Document>(dir: &Path) -> Result<Vec<T>> {
    let path = dir.join(collection_file::<T>());
    if !path.exists() {
        return Err(EstateError::path_not_found(path));
    }

    let text = fs::read_to_string(&path)?;
    from_documents(parse_documents(&text, &path.display().to_string())?)
}

/// Split raw file contents into documents. Empty input is an empty collection.
pub fn parse_documents(text: &str, context: &str) -> Result<Vec<Value>> {
    let trimmed = text.trim_start();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| EstateError::json(context, e));
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| EstateError::json(format!("{}:{}", context, n + 1), e))
        })
        .collect()
}
