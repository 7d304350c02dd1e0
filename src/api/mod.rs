//! API Module
//!
//! HTTP handlers and routing for the search front end.
//!
//! # Endpoints
//! - `GET /search?q=term` - Rate-limited, cached content search
//! - `GET /stats` - Limiter and cache statistics
//! - `GET /health` - Health check endpoint

pub mod client_key;
pub mod handlers;
pub mod routes;

pub use client_key::client_key;
pub use handlers::AppState;
pub use routes::create_router;
