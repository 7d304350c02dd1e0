//! Rate Limit Entry Module
//!
//! Per-key request tracking state for the fixed-window limiter.

// == Rate Limit Entry ==
/// Tracks requests observed for a single client key.
///
/// An entry is blocked exactly when `blocked_until` is set; the instant it
/// holds is when the block lifts.
#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    /// Number of requests observed in the current window
    pub count: u32,
    /// Instant (Unix milliseconds) at which the current window expires
    pub window_reset_at: u64,
    /// Instant (Unix milliseconds) after which the block lifts, if blocked
    pub blocked_until: Option<u64>,
}

impl RateLimitEntry {
    // == Constructor ==
    /// Creates a fresh entry for a key seen for the first time in a window.
    ///
    /// The request that creates the entry counts, so `count` starts at 1.
    pub fn new(now_ms: u64, window_ms: u64) -> Self {
        Self {
            count: 1,
            window_reset_at: now_ms + window_ms,
            blocked_until: None,
        }
    }

    // == Is Blocked ==
    /// Returns true if the key is currently serving a cooldown block.
    pub fn is_blocked(&self) -> bool {
        self.blocked_until.is_some()
    }

    // == Window Expired ==
    /// Checks whether the fixed window has elapsed.
    ///
    /// Boundary condition: the window is expired once the current time
    /// reaches `window_reset_at`, so a request arriving at exactly that
    /// instant starts a fresh window.
    pub fn window_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.window_reset_at
    }

    // == Block Elapsed ==
    /// Checks whether a block, if any, has run its course.
    ///
    /// Returns `false` for an entry that was never blocked. Like the window
    /// check, the comparison treats the exact boundary instant as elapsed.
    pub fn block_elapsed(&self, now_ms: u64) -> bool {
        match self.blocked_until {
            Some(until) => now_ms >= until,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_counts_the_creating_request() {
        let entry = RateLimitEntry::new(1_000, 60_000);

        assert_eq!(entry.count, 1);
        assert_eq!(entry.window_reset_at, 61_000);
        assert!(!entry.is_blocked());
    }

    #[test]
    fn test_window_expiry_boundary() {
        let entry = RateLimitEntry::new(0, 60_000);

        assert!(!entry.window_expired(59_999));
        // Expired at exactly the reset instant
        assert!(entry.window_expired(60_000));
        assert!(entry.window_expired(60_001));
    }

    #[test]
    fn test_block_elapsed_boundary() {
        let mut entry = RateLimitEntry::new(0, 60_000);
        entry.blocked_until = Some(300_000);

        assert!(entry.is_blocked());
        assert!(!entry.block_elapsed(299_999));
        assert!(entry.block_elapsed(300_000));
    }

    #[test]
    fn test_unblocked_entry_never_reports_block_elapsed() {
        let entry = RateLimitEntry::new(0, 60_000);

        assert!(!entry.block_elapsed(u64::MAX));
    }
}
