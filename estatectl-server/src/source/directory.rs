use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use estatectl_core::dataset::{collection_file, parse_documents};
use estatectl_core::{from_documents, Agent, Document, EstateError, Listing, ViewRecord};

use super::{SourceError, StatsSource};

/// Seed directory, re-read on every call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn load<T: Document>(&self) -> Result<Vec<T>, SourceError> {
        let path = self.dir.join(collection_file::<T>());

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => EstateError::path_not_found(&path),
            _ => EstateError::from(e),
        })?;

        let docs = parse_documents(&text, &path.display().to_string())?;
        Ok(from_documents(docs)?)
    }
}

#[async_trait]
impl StatsSource for DirectorySource {
    fn name(&self) -> &'static str {
        "directory"
    }

    async fn agents(&self) -> Result<Vec<Agent>, SourceError> {
        self.load().await
    }

    async fn listings(&self) -> Result<Vec<Listing>, SourceError> {
        self.load().await
    }

    async fn views(&self) -> Result<Vec<ViewRecord>, SourceError> {
        self.load().await
    }
}
