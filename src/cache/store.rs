//! TTL Cache Store Module
//!
//! Memoizes values for a bounded duration. Expired entries are evicted
//! lazily on read and in bulk by the periodic sweep; a miss is a normal
//! return value, never an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::cache::CacheEntry;
use crate::clock::{Clock, SystemClock};

// == Cache Stats ==
/// Snapshot of cache occupancy at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Entries currently held, live or not
    pub total_entries: usize,
    /// Entries that would still be returned by a read right now
    pub valid_entries: usize,
    /// Entries past their expiration, awaiting eviction
    pub expired_entries: usize,
}

// == TTL Cache ==
/// In-memory key-value cache with per-entry expiration.
///
/// The payload type is opaque; reads hand back a clone of the stored value.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied when `set` is called without an explicit one
    default_ttl_ms: u64,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates a cache using the system wall clock.
    ///
    /// # Panics
    /// Panics if `default_ttl_ms` is zero. This invariant is expected to be
    /// enforced by configuration validation.
    pub fn new(default_ttl_ms: u64) -> Self {
        Self::with_clock(default_ttl_ms, Arc::new(SystemClock))
    }

    /// Creates a cache with an injected time source.
    ///
    /// # Panics
    /// Panics if `default_ttl_ms` is zero.
    pub fn with_clock(default_ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        assert!(default_ttl_ms > 0, "default_ttl_ms must be positive");

        Self {
            entries: HashMap::new(),
            default_ttl_ms,
            clock,
        }
    }

    // == Get ==
    /// Retrieves the value stored under `key`, if any.
    ///
    /// An expired entry behaves exactly like an absent one and is deleted
    /// on the spot, so at most one read ever observes the transition.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now) {
                self.entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }

        None
    }

    // == Set ==
    /// Inserts or overwrites `key` with `value`.
    ///
    /// The entry expires `ttl_ms` (or the default TTL) from now; an
    /// overwrite replaces the previous expiration entirely.
    pub fn set(&mut self, key: String, value: V, ttl_ms: Option<u64>) {
        let now = self.clock.now_ms();
        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries.insert(key, CacheEntry::new(value, now, ttl));
    }

    // == Has ==
    /// Checks whether `key` currently holds a live value.
    ///
    /// Same semantics as [`get`](Self::get), including the eager eviction
    /// of an expired entry.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Sweep ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    // == Stats ==
    /// Returns a snapshot of total, live, and expired entry counts.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let valid_entries = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count();

        CacheStats {
            total_entries: self.entries.len(),
            valid_entries,
            expired_entries: self.entries.len() - valid_entries,
        }
    }

    // == Length ==
    /// Returns the current number of entries, including expired ones not
    /// yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
