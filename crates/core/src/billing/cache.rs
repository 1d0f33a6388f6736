//! Time-expiring cache for billing lookups.
//!
//! Entries carry their own expiry timestamp. Expired entries are evicted
//! lazily when read, and [`CostCache::purge_expired`] can be called
//! periodically to bound memory in long-lived processes.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::trace;

/// Default time-to-live for cache entries (60 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: Decimal,
    /// `None` when the TTL is too large to represent.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// Concurrent key/value cache with per-entry expiry.
///
/// Keys are billing date ranges (see `BillingPeriod::cache_key`). Safe to
/// share across request handlers behind an `Arc`.
#[derive(Debug)]
pub struct CostCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl CostCache {
    /// Creates an empty cache with the default 60 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates an empty cache with a custom default TTL.
    #[must_use]
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// TTL applied by [`CostCache::set`].
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the cached value, or `None` if absent or expired.
    ///
    /// An expired entry is removed as part of the lookup.
    pub fn get(&self, key: &str) -> Option<Decimal> {
        let now = Instant::now();
        let entry = *self.entries.get(key)?;

        if entry.is_expired(now) {
            // Only drop it if nobody refreshed the key in the meantime.
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            trace!(key, "Cost cache entry expired");
            return None;
        }

        Some(entry.value)
    }

    /// Stores a value with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: Decimal) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores a value that expires after `ttl`.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: Decimal, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for CostCache {
    fn default() -> Self {
        Self::new()
    }
}
