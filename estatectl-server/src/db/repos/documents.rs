//! Document repository
//!
//! Reads and writes the three JSONB collections:
//! - reads return raw documents; mapping onto records happens in the caller
//! - agents and listings upsert by id (ON CONFLICT), so reseeding is idempotent
//! - views have no natural key and are replaced wholesale on reseed

use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use estatectl_core::Dataset;

/// A document collection and the table backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Agents,
    Listings,
    Views,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Self::Agents => "agent_documents",
            Self::Listings => "listing_documents",
            Self::Views => "view_documents",
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Rows written by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub agents: u64,
    pub listings: u64,
    pub views: u64,
    pub views_replaced: u64,
}

/// Document repository
pub struct DocumentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DocumentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All documents of a collection, in id order.
    pub async fn fetch_all(&self, collection: Collection) -> Result<Vec<Value>, DbError> {
        let sql = format!("SELECT body FROM {} ORDER BY id", collection.table());
        let rows: Vec<Json<Value>> = sqlx::query_scalar(&sql).fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    /// Agent documents flagged active, in id order.
    ///
    /// Containment match on the JSONB body, so agents with a missing or
    /// non-boolean flag are left out.
    pub async fn fetch_active_agents(&self) -> Result<Vec<Value>, DbError> {
        let rows: Vec<Json<Value>> = sqlx::query_scalar(
            r#"
            SELECT body FROM agent_documents
            WHERE body @> '{"active": true}'::jsonb
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    /// Insert or replace a keyed document (agents, listings).
    pub async fn upsert(&self, collection: Collection, id: i64, doc: &Value) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        upsert_document(&mut conn, collection, id, doc).await
    }

    /// Append a view document.
    pub async fn insert_view(&self, doc: &Value) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        insert_view_document(&mut conn, doc).await
    }

    /// Delete every view document, returning how many were removed.
    pub async fn clear_views(&self) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        delete_view_documents(&mut conn).await
    }

    /// Load a dataset: upsert agents and listings, replace views (atomic).
    ///
    /// Runs in one transaction, so a failed seed leaves the previous
    /// documents in place and readers never see the views half-replaced.
    pub async fn load_dataset(&self, dataset: &Dataset) -> Result<SeedReport, DbError> {
        let mut report = SeedReport::default();
        let mut tx = self.pool.begin().await?;

        for agent in &dataset.agents {
            upsert_document(&mut tx, Collection::Agents, agent.id, &serde_json::to_value(agent)?)
                .await?;
            report.agents += 1;
        }

        for listing in &dataset.listings {
            upsert_document(&mut tx, Collection::Listings, listing.id, &serde_json::to_value(listing)?)
                .await?;
            report.listings += 1;
        }

        report.views_replaced = delete_view_documents(&mut tx).await?;
        for view in &dataset.views {
            insert_view_document(&mut tx, &serde_json::to_value(view)?).await?;
            report.views += 1;
        }

        tx.commit().await?;

        tracing::info!(
            agents = report.agents,
            listings = report.listings,
            views = report.views,
            views_replaced = report.views_replaced,
            "dataset loaded"
        );

        Ok(report)
    }
}

async fn upsert_document(
    conn: &mut PgConnection,
    collection: Collection,
    id: i64,
    doc: &Value,
) -> Result<(), DbError> {
    let sql = format!(
        "INSERT INTO {} (id, body) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET body = EXCLUDED.body",
        collection.table()
    );

    sqlx::query(&sql)
        .bind(id)
        .bind(Json(doc))
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn insert_view_document(conn: &mut PgConnection, doc: &Value) -> Result<(), DbError> {
    sqlx::query("INSERT INTO view_documents (body) VALUES ($1)")
        .bind(Json(doc))
        .execute(&mut *conn)
        .await?;

    Ok(())
}

async fn delete_view_documents(conn: &mut PgConnection) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM view_documents")
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
