//! Property-Based Tests for the Rate Limiter
//!
//! Uses proptest with a manual clock, so windows and blocks elapse without
//! real delays.

use proptest::prelude::*;
use std::sync::Arc;

use crate::clock::test_support::ManualClock;
use crate::clock::Clock;
use crate::limiter::RateLimiter;

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.:-]{1,40}".prop_map(|s| s)
}

fn setup(max_requests: u32, window_ms: u64, block_ms: u64) -> (Arc<ManualClock>, RateLimiter) {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = RateLimiter::with_clock(
        max_requests,
        window_ms,
        block_ms,
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    (clock, limiter)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The first `max_requests` checks inside a window are all allowed, with
    // `remaining` stepping down by exactly one per call until it hits zero.
    #[test]
    fn prop_within_limit_all_allowed(
        key in key_strategy(),
        max_requests in 1u32..20,
        window_ms in 1_000u64..600_000,
    ) {
        let (_clock, mut limiter) = setup(max_requests, window_ms, 300_000);

        for i in 1..=max_requests {
            let decision = limiter.check(&key);
            prop_assert!(decision.allowed, "call {} of {} should pass", i, max_requests);
            prop_assert_eq!(decision.remaining, max_requests - i);
            prop_assert_eq!(decision.reset_at_ms, window_ms);
        }
    }

    // The call that goes one past the limit is denied, and every further
    // call stays denied for the whole cooldown.
    #[test]
    fn prop_exceeding_blocks_for_cooldown(
        key in key_strategy(),
        max_requests in 1u32..20,
        block_ms in 1_000u64..600_000,
        denied_retries in 1usize..10,
    ) {
        let (clock, mut limiter) = setup(max_requests, 60_000, block_ms);

        for _ in 0..max_requests {
            limiter.check(&key);
        }

        let denial = limiter.check(&key);
        prop_assert!(!denial.allowed);
        prop_assert_eq!(denial.remaining, 0);
        prop_assert_eq!(denial.reset_at_ms, block_ms);

        // Denied calls while blocked never extend or shorten the cooldown
        for _ in 0..denied_retries {
            clock.set(block_ms - 1);
            let repeat = limiter.check(&key);
            prop_assert!(!repeat.allowed);
            prop_assert_eq!(repeat.reset_at_ms, block_ms);
        }
    }

    // Once the cooldown elapses, the key behaves as if it had never been
    // seen: allowed with a full fresh window.
    #[test]
    fn prop_unblock_is_a_full_reset(
        key in key_strategy(),
        max_requests in 1u32..20,
        block_ms in 1_000u64..600_000,
        extra_wait in 0u64..10_000,
    ) {
        let (clock, mut limiter) = setup(max_requests, 60_000, block_ms);

        for _ in 0..=max_requests {
            limiter.check(&key);
        }

        clock.set(block_ms + extra_wait);
        let decision = limiter.check(&key);
        prop_assert!(decision.allowed);
        prop_assert_eq!(decision.remaining, max_requests - 1);
        prop_assert_eq!(decision.reset_at_ms, block_ms + extra_wait + 60_000);
    }

    // Limits are tracked per key: exhausting one key leaves every other
    // key's budget untouched.
    #[test]
    fn prop_keys_do_not_interfere(
        keys in prop::collection::hash_set(key_strategy(), 2..8),
        max_requests in 1u32..10,
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (_clock, mut limiter) = setup(max_requests, 60_000, 300_000);

        // Exhaust and block the first key
        for _ in 0..=max_requests {
            limiter.check(&keys[0]);
        }
        prop_assert!(!limiter.check(&keys[0]).allowed);

        for key in keys.iter().skip(1) {
            let decision = limiter.check(key);
            prop_assert!(decision.allowed, "key {} should be unaffected", key);
            prop_assert_eq!(decision.remaining, max_requests - 1);
        }
    }

    // A sweep never changes any future decision: it only drops entries that
    // are already dead (expired window, elapsed block).
    #[test]
    fn prop_sweep_preserves_decisions(
        key in key_strategy(),
        max_requests in 1u32..10,
        used in 0u32..10,
    ) {
        let used = used.min(max_requests - 1);

        let (_c1, mut swept) = setup(max_requests, 60_000, 300_000);
        let (_c2, mut untouched) = setup(max_requests, 60_000, 300_000);

        for _ in 0..used {
            swept.check(&key);
            untouched.check(&key);
        }

        swept.sweep();

        prop_assert_eq!(swept.check(&key), untouched.check(&key));
    }
}
