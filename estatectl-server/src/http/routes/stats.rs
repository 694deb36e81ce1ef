//! Active agent statistics
//!
//! GET /stats/active-agents[?threshold=N]
//!
//! Fetches agents, listings and views from the configured source and returns
//! one `{agent, listings, totalViews}` entry per active agent, highest view
//! count first.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::Deserialize;

use estatectl_core::config::validate_threshold;
use estatectl_core::AgentStat;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::source::fetch_snapshot;

/// Query parameters
#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// Overrides the configured price threshold for this request
    pub threshold: Option<f64>,
}

/// GET /stats/active-agents
async fn active_agents(
    State(state): State<Arc<AppState>>,
    params: Result<Query<StatsParams>, QueryRejection>,
) -> Result<Json<Vec<AgentStat>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let threshold = match params.threshold {
        Some(value) => validate_threshold(value).map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => state.price_threshold,
    };

    let snapshot = fetch_snapshot(state.source.as_ref())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch active agents statistics", e))?;

    let stats = snapshot.active_agent_stats(threshold);
    tracing::info!(
        source = state.source.name(),
        threshold,
        agents = stats.len(),
        "served active agent stats"
    );

    Ok(Json(stats))
}

/// Stats routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats/active-agents", get(active_agents))
}
