//! Rate Limiter Engine
//!
//! Fixed-window counting per client key. A key that exceeds the limit inside
//! one window is denied and put in a cooldown block; once the cooldown
//! elapses the key starts over as if it had never been seen.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::limiter::RateLimitEntry;

// == Decision ==
/// Outcome of a single [`RateLimiter::check`] call.
///
/// `reset_at_ms` is the end of the current window for allowed requests, or
/// the end of the cooldown block for denied ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window (0 when denied)
    pub remaining: u32,
    /// Instant (Unix milliseconds) at which the window or block resets
    pub reset_at_ms: u64,
}

impl RateLimitDecision {
    /// Seconds until `reset_at_ms`, rounded up. Used for `Retry-After`.
    pub fn retry_after_secs(&self, now_ms: u64) -> u64 {
        self.reset_at_ms.saturating_sub(now_ms).div_ceil(1000)
    }
}

// == Stats ==
/// Snapshot of limiter occupancy, exposed on the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RateLimiterStats {
    /// Number of client keys currently tracked
    pub tracked_keys: usize,
    /// Number of keys currently serving a cooldown block
    pub blocked_keys: usize,
}

// == Rate Limiter ==
/// Fixed-window rate limiter with per-key cooldown blocking.
#[derive(Debug)]
pub struct RateLimiter {
    /// Per-key tracking state
    entries: HashMap<String, RateLimitEntry>,
    /// Requests allowed per window
    max_requests: u32,
    /// Window length in milliseconds
    window_ms: u64,
    /// Cooldown applied once the limit is exceeded, in milliseconds
    block_ms: u64,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter using the system wall clock.
    ///
    /// # Panics
    /// Panics if any parameter is zero. These invariants are expected to be
    /// enforced by configuration validation.
    pub fn new(max_requests: u32, window_ms: u64, block_ms: u64) -> Self {
        Self::with_clock(max_requests, window_ms, block_ms, Arc::new(SystemClock))
    }

    /// Creates a limiter with an injected time source.
    ///
    /// # Panics
    /// Panics if any parameter is zero.
    pub fn with_clock(
        max_requests: u32,
        window_ms: u64,
        block_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        assert!(max_requests > 0, "max_requests must be positive");
        assert!(window_ms > 0, "window_ms must be positive");
        assert!(block_ms > 0, "block_ms must be positive");

        Self {
            entries: HashMap::new(),
            max_requests,
            window_ms,
            block_ms,
            clock,
        }
    }

    // == Check ==
    /// Decides whether a request from `identity` may proceed.
    ///
    /// Never fails; every call returns a decision and updates the tracking
    /// state. The block takes precedence over window bookkeeping: a blocked
    /// key is denied without touching its counter, and a key whose cooldown
    /// has elapsed is discarded entirely before being treated as new.
    ///
    /// The request that pushes `count` past the limit is itself denied and
    /// triggers the block, it is not let through.
    pub fn check(&mut self, identity: &str) -> RateLimitDecision {
        let now = self.clock.now_ms();

        if let Some(blocked_until) = self.entries.get(identity).and_then(|e| e.blocked_until) {
            if now < blocked_until {
                return RateLimitDecision {
                    allowed: false,
                    remaining: 0,
                    reset_at_ms: blocked_until,
                };
            }
            // Cooldown over: full reset, the key starts from scratch
            self.entries.remove(identity);
        }

        if let Some(entry) = self.entries.get_mut(identity) {
            if !entry.window_expired(now) {
                entry.count += 1;

                if entry.count > self.max_requests {
                    let blocked_until = now + self.block_ms;
                    entry.blocked_until = Some(blocked_until);
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at_ms: blocked_until,
                    };
                }

                return RateLimitDecision {
                    allowed: true,
                    remaining: self.max_requests - entry.count,
                    reset_at_ms: entry.window_reset_at,
                };
            }
        }

        // New key, or a window that has run out: start a fresh one
        let entry = RateLimitEntry::new(now, self.window_ms);
        let decision = RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - 1,
            reset_at_ms: entry.window_reset_at,
        };
        self.entries.insert(identity.to_string(), entry);
        decision
    }

    // == Sweep ==
    /// Drops entries that no longer influence any decision.
    ///
    /// An unblocked entry is dead once its window has expired; a blocked
    /// entry once its cooldown has elapsed. Returns the number of entries
    /// removed.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| {
            if entry.is_blocked() {
                !entry.block_elapsed(now)
            } else {
                !entry.window_expired(now)
            }
        });

        before - self.entries.len()
    }

    // == Stats ==
    /// Returns a snapshot of tracked and blocked key counts.
    pub fn stats(&self) -> RateLimiterStats {
        RateLimiterStats {
            tracked_keys: self.entries.len(),
            blocked_keys: self.entries.values().filter(|e| e.is_blocked()).count(),
        }
    }

    /// Requests allowed per window, as configured.
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    // == Length ==
    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
