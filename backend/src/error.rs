//! Error handling for the weather dashboard server
//!
//! Every failure is reported as HTTP 500 with a `{error, message}` body.
//! Nothing is retried server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Upstream provider errors
    #[error("{endpoint} API error: {status}")]
    Upstream { endpoint: &'static str, status: String },

    #[error("{endpoint} API request timed out")]
    UpstreamTimeout { endpoint: &'static str },

    #[error("{endpoint} API request failed: {message}")]
    UpstreamRequest {
        endpoint: &'static str,
        message: String,
    },

    #[error("Invalid {endpoint} payload: {message}")]
    InvalidPayload {
        endpoint: &'static str,
        message: String,
    },

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable summary used for the `error` field of the response body
    pub fn summary(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "Weather service is not configured",
            AppError::Upstream { .. }
            | AppError::UpstreamTimeout { .. }
            | AppError::UpstreamRequest { .. }
            | AppError::InvalidPayload { .. } => "Failed to fetch weather data",
            AppError::Validation(_) => "Weather data failed validation",
            AppError::DatabaseError(_) => "Failed to store weather data",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.summary().to_string(),
            message: self.to_string(),
        };

        // Log the error for debugging
        tracing::error!(error = ?self, "request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
