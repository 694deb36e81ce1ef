//! Postgres pool for the document tables
//!
//! A stats request reads agents, listings and views concurrently, so one
//! request can hold three connections at once. A seed run holds a single
//! connection for its transaction.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Room for one stats request plus a concurrent seed. Raise
/// `[database] max_connections` for more parallel requests.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pool with [`DEFAULT_MAX_CONNECTIONS`]. Fails if the first connection
/// can't be made.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Pool sized from config. Below three connections the collection fetches
/// of a single stats request queue behind each other.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p estatectl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_serves_concurrent_collection_reads() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        assert_eq!(pool.options().get_max_connections(), DEFAULT_MAX_CONNECTIONS);

        let (a, b, c) = tokio::try_join!(
            pool.acquire(),
            pool.acquire(),
            pool.acquire()
        )
        .expect("three connections for one stats request");
        drop((a, b, c));
    }
}
