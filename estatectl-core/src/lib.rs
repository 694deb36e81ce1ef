//! estatectl-core: records and active-agent statistics for the listings service.

pub mod config;
pub mod dataset;
pub mod error;
pub mod records;
pub mod stats;

pub use config::EstateConfig;
pub use dataset::Dataset;
pub use error::{EstateError, Result};
pub use records::{from_documents, Agent, AgentStat, Document, Listing, ViewRecord};
pub use stats::{compute_active_agent_stats, DEFAULT_PRICE_THRESHOLD};
