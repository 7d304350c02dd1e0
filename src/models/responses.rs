//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies. Search results
//! themselves are serialized straight from the search module.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::limiter::RateLimiterStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Rate limiter occupancy
    pub limiter: RateLimiterStats,
    /// Search result cache occupancy
    pub cache: CacheStats,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_stats_response_serialize() {
        let resp = StatsResponse {
            limiter: RateLimiterStats {
                tracked_keys: 3,
                blocked_keys: 1,
            },
            cache: CacheStats {
                total_entries: 5,
                valid_entries: 4,
                expired_entries: 1,
            },
        };

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("tracked_keys"));
        assert!(json.contains("valid_entries"));
    }
}
