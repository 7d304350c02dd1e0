//! API Handlers
//!
//! HTTP request handlers for each endpoint. The search handler is where
//! the limiter and cache meet the wire: a denied decision becomes a 429,
//! a cache consultation becomes an `X-Cache` header.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::client_key;
use crate::cache::TtlCache;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::limiter::{RateLimitDecision, RateLimiter};
use crate::models::{HealthResponse, SearchQuery, StatsResponse};
use crate::search::{search_cache_key, SearchIndex, SearchResults};

/// Application state shared across all handlers.
///
/// The limiter and cache are plain single-threaded state machines; wrapping
/// them in `Arc<RwLock<..>>` makes every check-then-mutate sequence hold the
/// write lock for its full duration, which preserves per-key atomicity on
/// the multi-threaded runtime.
#[derive(Clone)]
pub struct AppState {
    /// Per-client request limiter
    pub limiter: Arc<RwLock<RateLimiter>>,
    /// Memoized search results
    pub cache: Arc<RwLock<TtlCache<SearchResults>>>,
    /// Search backend
    pub index: Arc<SearchIndex>,
    /// Time source, shared with the limiter and cache
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new AppState from already-built components.
    pub fn new(limiter: RateLimiter, cache: TtlCache<SearchResults>, index: SearchIndex) -> Self {
        Self {
            limiter: Arc::new(RwLock::new(limiter)),
            cache: Arc::new(RwLock::new(cache)),
            index: Arc::new(index),
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, index: SearchIndex) -> Self {
        let limiter = RateLimiter::new(
            config.max_requests,
            config.window_ms,
            config.block_duration_ms,
        );
        let cache = TtlCache::new(config.cache_ttl_ms);
        Self::new(limiter, cache, index)
    }
}

/// Handler for GET /search
///
/// Order matters: the rate limiter sees every request, including ones that
/// would fail validation, so malformed floods still burn budget.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let key = client_key(&headers);

    let (decision, limit) = {
        let mut limiter = state.limiter.write().await;
        (limiter.check(&key), limiter.max_requests())
    };

    if !decision.allowed {
        let now = state.clock.now_ms();
        debug!(client = %key, "search request rate limited");
        return Err(ApiError::RateLimited {
            limit,
            reset_iso: iso_timestamp(decision.reset_at_ms),
            retry_after_secs: decision.retry_after_secs(now),
        });
    }

    if let Some(message) = query.validate() {
        return Err(ApiError::InvalidQuery(message));
    }

    let cache_key = search_cache_key(&query.q);

    if let Some(results) = state.cache.write().await.get(&cache_key) {
        debug!(key = %cache_key, "search cache hit");
        return Ok(search_response(&decision, limit, "HIT", results));
    }

    let results = state.index.search(&query.q);
    state
        .cache
        .write()
        .await
        .set(cache_key, results.clone(), None);

    Ok(search_response(&decision, limit, "MISS", results))
}

/// Handler for GET /stats
///
/// Returns limiter and cache occupancy snapshots.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let limiter = state.limiter.read().await;
    let cache = state.cache.read().await;

    Json(StatsResponse {
        limiter: limiter.stats(),
        cache: cache.stats(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Response Assembly ==
fn search_response(
    decision: &RateLimitDecision,
    limit: u32,
    cache_status: &'static str,
    results: SearchResults,
) -> Response {
    (
        [
            ("X-RateLimit-Limit", limit.to_string()),
            ("X-RateLimit-Remaining", decision.remaining.to_string()),
            ("X-RateLimit-Reset", iso_timestamp(decision.reset_at_ms)),
            ("X-Cache", cache_status.to_string()),
        ],
        Json(results),
    )
        .into_response()
}

/// Formats a Unix-millisecond instant as ISO 8601 for the reset header.
fn iso_timestamp(epoch_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|instant| instant.to_rfc3339())
        .unwrap_or_default()
}
