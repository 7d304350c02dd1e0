//! Content Gate - Rate limiting and search caching for content front ends
//!
//! Provides a fixed-window rate limiter with cooldown blocking, a TTL
//! result cache with background sweeping, and the HTTP search endpoint
//! that ties them together.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod search;
pub mod tasks;

pub use api::AppState;
pub use cache::{FifoCache, TtlCache};
pub use config::Config;
pub use limiter::RateLimiter;
pub use tasks::{spawn_cache_sweep_task, spawn_limiter_sweep_task};
