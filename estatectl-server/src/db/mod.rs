//! Database layer - connection pool, table bootstrap and the document repository
//!
//! Collections are stored as JSONB documents, one table each. Records are
//! mapped from the documents outside this layer.

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
