//! Upstream data sources for the statistics endpoint.
//!
//! A [`StatsSource`] supplies the three collections. Sources are read fresh on
//! every request; nothing is cached between calls.

mod directory;
mod memory;
mod postgres;

pub use directory::DirectorySource;
pub use memory::MemorySource;
pub use postgres::PgSource;

use async_trait::async_trait;
use estatectl_core::{Agent, Dataset, EstateError, Listing, ViewRecord};

use crate::db::DbError;

/// Failure to supply a collection.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("dataset error: {0}")]
    Dataset(#[from] EstateError),
}

/// Supplies agents, listings and views.
///
/// Implementations may return a pre-filtered subset (for example only active
/// agents); the statistics engine re-applies every filter itself.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn agents(&self) -> Result<Vec<Agent>, SourceError>;

    async fn listings(&self) -> Result<Vec<Listing>, SourceError>;

    async fn views(&self) -> Result<Vec<ViewRecord>, SourceError>;
}

/// Fetch all three collections concurrently.
///
/// Fails as a whole if any collection can't be read.
pub async fn fetch_snapshot(source: &dyn StatsSource) -> Result<Dataset, SourceError> {
    let (agents, listings, views) =
        tokio::try_join!(source.agents(), source.listings(), source.views())?;

    tracing::debug!(
        source = source.name(),
        agents = agents.len(),
        listings = listings.len(),
        views = views.len(),
        "fetched snapshot"
    );

    Ok(Dataset {
        agents,
        listings,
        views,
    })
}
