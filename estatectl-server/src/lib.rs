//! estatectl-server: HTTP server for active agent statistics
//!
//! Serves `/stats/active-agents` over a pluggable [`source::StatsSource`]
//! (seed directory, Postgres JSONB documents, or an in-memory snapshot).

pub mod db;
pub mod http;
pub mod source;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use source::{fetch_snapshot, DirectorySource, MemorySource, PgSource, SourceError, StatsSource};
