use async_trait::async_trait;
use estatectl_core::{from_documents, Agent, Listing, ViewRecord};
use sqlx::PgPool;

use super::{SourceError, StatsSource};
use crate::db::{Collection, DocumentRepo};

/// JSONB document tables in Postgres.
///
/// Agents are filtered to active ones in the query.
#[derive(Debug, Clone)]
pub struct PgSource {
    pool: PgPool,
}

impl PgSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsSource for PgSource {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn agents(&self) -> Result<Vec<Agent>, SourceError> {
        let docs = DocumentRepo::new(&self.pool).fetch_active_agents().await?;
        Ok(from_documents(docs)?)
    }

    async fn listings(&self) -> Result<Vec<Listing>, SourceError> {
        let docs = DocumentRepo::new(&self.pool)
            .fetch_all(Collection::Listings)
            .await?;
        Ok(from_documents(docs)?)
    }

    async fn views(&self) -> Result<Vec<ViewRecord>, SourceError> {
        let docs = DocumentRepo::new(&self.pool)
            .fetch_all(Collection::Views)
            .await?;
        Ok(from_documents(docs)?)
    }
}
