//! Error response envelope.
//!
//! Successful movie responses are a bare JSON array; everything that goes
//! wrong is reported in this shape instead.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Name reported in the `meta.service` field of error bodies.
pub const SERVICE_NAME: &str = "movie-service";

/// Body written for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,

    /// Error details.
    pub error: ApiError,

    /// Response metadata.
    pub meta: ResponseMeta,
}

/// API error details.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code for client handling (e.g., "QUERY_FAILED").
    pub code: String,

    /// Human-readable error message.
    pub message: String,
}

/// Response metadata.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,

    /// Service name that handled the request.
    pub service: String,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

impl ErrorResponse {
    /// Creates an error body with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::default(),
        }
    }
}
