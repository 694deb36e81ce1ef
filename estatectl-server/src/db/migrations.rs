//! Table bootstrap for the document collections
//!
//! Each collection is a table of JSONB documents keyed by a numeric id.
//! Views have no natural key, so theirs is a serial.

use sqlx::PgPool;

use super::repos::DbError;

/// Create the document tables if they don't exist yet
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring document tables exist...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agent_documents (
            id BIGINT PRIMARY KEY,
            body JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listing_documents (
            id BIGINT PRIMARY KEY,
            body JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS view_documents (
            id BIGSERIAL PRIMARY KEY,
            body JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Document tables ready");
    Ok(())
}
