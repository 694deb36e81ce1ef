use std::sync::Arc;

use async_trait::async_trait;
use estatectl_core::{Agent, Dataset, Listing, ViewRecord};

use super::{SourceError, StatsSource};

/// In-memory snapshot, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dataset: Arc<Dataset>,
}

impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

#[async_trait]
impl StatsSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn agents(&self) -> Result<Vec<Agent>, SourceError> {
        Ok(self.dataset.agents.clone())
    }

    async fn listings(&self) -> Result<Vec<Listing>, SourceError> {
        Ok(self.dataset.listings.clone())
    }

    async fn views(&self) -> Result<Vec<ViewRecord>, SourceError> {
        Ok(self.dataset.views.clone())
    }
}
