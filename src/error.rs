//! Error types for the API layer
//!
//! The limiter and cache themselves are total: every operation returns a
//! value. Errors only exist at the HTTP boundary, where a denied decision
//! or a bad request must become a client-visible response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == API Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client exceeded its request budget
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited {
        /// Requests allowed per window, for the limit header
        limit: u32,
        /// ISO-8601 instant at which the block or window resets
        reset_iso: String,
        /// Whole seconds until the reset, rounded up
        retry_after_secs: u64,
    },

    /// Query failed validation
    #[error("Invalid request: {0}")]
    InvalidQuery(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RateLimited {
                limit,
                reset_iso,
                retry_after_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("X-RateLimit-Limit", limit.to_string()),
                    ("X-RateLimit-Remaining", "0".to_string()),
                    ("X-RateLimit-Reset", reset_iso),
                    ("Retry-After", retry_after_secs.to_string()),
                ],
                Json(json!({
                    "error": "Too many requests. Please try again later.",
                    "retryAfter": retry_after_secs,
                })),
            )
                .into_response(),

            ApiError::InvalidQuery(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),

            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;
