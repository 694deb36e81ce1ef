//! Repository implementations for database access

pub mod documents;

pub use documents::{Collection, DbError, DocumentRepo, SeedReport};
