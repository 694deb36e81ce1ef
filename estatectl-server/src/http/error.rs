//! API error types with IntoResponse
//!
//! Every error is rendered as `{"error": true, "message": "..."}`.
//! Upstream failures are logged in full and reported with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::source::SourceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request parameters (400)
    BadRequest { message: String },

    /// No such route (404)
    NotFound,

    /// A data source could not supply its collection (500, logged)
    Upstream {
        message: &'static str,
        source: SourceError,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn upstream(message: &'static str, source: SourceError) -> Self {
        Self::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest { message } => message,
            Self::NotFound => "Not found".to_string(),
            Self::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                message.to_string()
            }
        };

        let body = json!({
            "error": true,
            "message": message
        });

        (status, Json(body)).into_response()
    }
}
