//! Request DTOs for the API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

// == Query Length Bounds ==
/// Minimum query length after trimming
pub const MIN_QUERY_LENGTH: usize = 2;

/// Maximum query length after trimming
pub const MAX_QUERY_LENGTH: usize = 100;

/// Query parameters for the search endpoint (GET /search)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// The search term
    pub q: String,
}

impl SearchQuery {
    /// Validates the query string.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let trimmed = self.q.trim();

        if trimmed.chars().count() < MIN_QUERY_LENGTH {
            return Some(format!(
                "Query must contain at least {} characters",
                MIN_QUERY_LENGTH
            ));
        }
        if trimmed.chars().count() > MAX_QUERY_LENGTH {
            return Some(format!(
                "Query exceeds maximum length of {} characters",
                MAX_QUERY_LENGTH
            ));
        }
        None
    }
}
