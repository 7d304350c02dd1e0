//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: drops expired search results at configured intervals
//! - Limiter sweep: drops dead rate-limit entries at configured intervals

mod sweep;

pub use sweep::{spawn_cache_sweep_task, spawn_limiter_sweep_task};
