//! Cache store implementation.

use bridge_http::Clock;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// A cached value together with its expiry instant.
///
/// Owned exclusively by the store; values leave it only by clone.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at_ms: i64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// In-memory TTL cache mapping request keys to values.
///
/// Lookups at or after an entry's expiry instant behave as absent and
/// evict the entry. No operation blocks; concurrent writers to the same
/// key are last-write-wins.
pub struct CacheStore<V> {
    entries: DashMap<String, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    /// Creates an empty store using the given time source.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Returns the cached value for `key`, or `None` if the key was never
    /// set, was invalidated, or has expired. An expired entry is evicted
    /// on the spot.
    pub fn get(&self, key: &str) -> Option<V> {
        let now_ms = self.clock.unix_timestamp_millis();

        let entry = self.entries.get(key)?;
        if entry.is_expired(now_ms) {
            drop(entry);
            self.entries.remove(key);
            trace!(key, "Evicted expired cache entry on lookup");
            return None;
        }

        Some(entry.value.clone())
    }

    /// Stores `value` under `key` for `ttl`. Replaces any previous entry
    /// for the key regardless of its remaining lifetime.
    pub fn set(&self, key: String, value: V, ttl: Duration) {
        let expires_at_ms = self.clock.unix_timestamp_millis() + ttl.as_millis() as i64;
        trace!(key = %key, expires_at_ms, "Caching value");
        self.entries.insert(key, CacheEntry { value, expires_at_ms });
    }

    /// Removes `key` immediately, if present.
    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every entry whose expiry instant has passed and returns how
    /// many were evicted. Called by the scheduled sweeper and usable
    /// directly.
    pub fn purge_expired(&self) -> usize {
        let now_ms = self.clock.unix_timestamp_millis();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now_ms));
        before - self.entries.len()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock whose current time is advanced by hand.
    struct ManualClock {
        now_ms: AtomicI64,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now_ms: AtomicI64::new(1_700_000_000_000),
            }
        }

        fn advance(&self, delta: Duration) {
            self.now_ms
                .fetch_add(delta.as_millis() as i64, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_millis_opt(self.now_ms.load(Ordering::SeqCst))
                .unwrap()
        }
    }

    fn store_with_clock() -> (CacheStore<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (CacheStore::new(clock.clone()), clock)
    }

    #[test]
    fn test_unrequested_key_is_absent() {
        let (store, _clock) = store_with_clock();
        assert_eq!(store.get("never-set"), None);
    }

    #[test]
    fn test_get_before_ttl_returns_value() {
        let (store, clock) = store_with_clock();
        store.set("k".to_string(), "v".to_string(), Duration::from_secs(300));

        clock.advance(Duration::from_millis(299_999));
        assert_eq!(store.get("k"), Some("v".to_string()));
    }

    #[test]
    fn test_get_at_ttl_is_absent_and_evicts() {
        let (store, clock) = store_with_clock();
        store.set("k".to_string(), "v".to_string(), Duration::from_secs(300));

        clock.advance(Duration::from_secs(300));
        assert_eq!(store.get("k"), None);
        // Lazy eviction removed the entry outright.
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let (store, _clock) = store_with_clock();
        store.set("k".to_string(), "first".to_string(), Duration::from_secs(10));
        store.set("k".to_string(), "second".to_string(), Duration::from_secs(10));

        assert_eq!(store.get("k"), Some("second".to_string()));
    }

    #[test]
    fn test_invalidate_removes_immediately() {
        let (store, _clock) = store_with_clock();
        store.set("k".to_string(), "v".to_string(), Duration::from_secs(10));
        store.invalidate("k");

        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_purge_expired_only_removes_stale_entries() {
        let (store, clock) = store_with_clock();
        store.set("short".to_string(), "a".to_string(), Duration::from_secs(1));
        store.set("long".to_string(), "b".to_string(), Duration::from_secs(60));

        clock.advance(Duration::from_secs(2));
        let purged = store.purge_expired();

        assert_eq!(purged, 1);
        assert_eq!(store.get("short"), None);
        assert_eq!(store.get("long"), Some("b".to_string()));
    }

    #[test]
    fn test_replacing_entry_extends_lifetime() {
        let (store, clock) = store_with_clock();
        store.set("k".to_string(), "old".to_string(), Duration::from_secs(1));

        clock.advance(Duration::from_millis(900));
        store.set("k".to_string(), "new".to_string(), Duration::from_secs(1));

        clock.advance(Duration::from_millis(900));
        assert_eq!(store.get("k"), Some("new".to_string()));
    }
}
