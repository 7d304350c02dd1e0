//! Models Module
//!
//! Request and response DTOs for the HTTP API.

pub mod requests;
pub mod responses;

pub use requests::SearchQuery;
pub use responses::{HealthResponse, StatsResponse};
