//! Application error types.
//!
//! Every fallible operation in the service returns [`AppResult`]. Errors that
//! reach a handler are rendered through [`IntoResponse`].

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::ErrorResponse;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while serving movie requests.
#[derive(Debug, Error)]
pub enum AppError {
    /// Connection parameters are unusable. Fatal at startup.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A session against the database could not be opened.
    #[error("database connection failed: {0}")]
    DatabaseConnection(String),

    /// The query failed to execute or its result stream broke.
    #[error("database query failed: {0}")]
    DatabaseQuery(String),

    /// A result row did not match the expected column types.
    #[error("failed to decode row: {0}")]
    RowDecode(String),

    /// The collected records could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Committing or rolling back a session failed.
    #[error("failed to release session: {0}")]
    SessionRelease(String),
}

impl AppError {
    /// Machine readable code carried in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::DatabaseConnection(_) => "DATABASE_UNAVAILABLE",
            AppError::DatabaseQuery(_) => "QUERY_FAILED",
            AppError::RowDecode(_) => "ROW_DECODE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::SessionRelease(_) => "SESSION_RELEASE_ERROR",
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Nothing could be encoded, so don't try to encode an error body either.
        if let AppError::Serialization(_) = self {
            return (status, Body::empty()).into_response();
        }

        let body = ErrorResponse::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Configuration(errors.to_string())
    }
}
