//! Client Identity Extraction
//!
//! Derives the opaque key the rate limiter tracks requests under. Proxy
//! headers are preferred; without them the key degrades to a stable hash
//! of the User-Agent rather than a single shared constant, so unrelated
//! clients are not conflated into one budget.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::http::HeaderMap;

/// Extracts a rate-limit key from request headers.
///
/// Tries `X-Forwarded-For` (first hop), then `X-Real-IP`, then a hash of
/// the `User-Agent`, and only then the `"unknown"` constant.
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        // Can contain the whole proxy chain; the first entry is the client
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    if let Some(user_agent) = header_str(headers, "user-agent") {
        let mut hasher = DefaultHasher::new();
        user_agent.hash(&mut hasher);
        return format!("ua-{:016x}", hasher.finish());
    }

    "unknown".to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
