//! Service banner at `/`

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// GET / - name, version and the routes this server answers
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Real Estate Listings API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "stats": {
                "GET /stats/active-agents": "Get active agents statistics with listings and views"
            }
        }
    }))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
