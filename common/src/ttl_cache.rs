//! Bounded, time-limited in-memory cache.

use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Millisecond time source. Only differences between readings matter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock for native targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start_ms)))
    }

    pub fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub ttl_ms: u64,
    pub max_entries: usize,
}

struct CachedEntry<V> {
    value: V,
    inserted_at_ms: u64,
}

/// Entries are fresh while their age is at most `ttl_ms`. When full, the least
/// recently used entry is evicted.
pub struct TtlCache<K: Hash + Eq, V> {
    entries: LruCache<K, CachedEntry<V>>,
    ttl_ms: u64,
}

impl<K: Hash + Eq + Clone, V> TtlCache<K, V> {
    pub fn new(policy: CachePolicy) -> Self {
        let capacity = NonZeroUsize::new(policy.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self { entries: LruCache::new(capacity), ttl_ms: policy.ttl_ms }
    }

    pub fn get(&mut self, key: &K, now_ms: u64) -> Option<&V> {
        let expired = match self.entries.peek(key) {
            None => return None,
            Some(entry) => self.is_expired(entry, now_ms),
        };
        if expired {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn put(&mut self, key: K, value: V, now_ms: u64) {
        self.purge_expired(now_ms);
        self.entries.put(key, CachedEntry { value, inserted_at_ms: now_ms });
    }

    pub fn purge_expired(&mut self, now_ms: u64) {
        let expired = self
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now_ms))
            .map(|(key, _)| key.clone())
            .collect::<Vec<_>>();
        for key in expired {
            self.entries.pop(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CachedEntry<V>, now_ms: u64) -> bool {
        now_ms.saturating_sub(entry.inserted_at_ms) > self.ttl_ms
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cache(ttl_ms: u64, max_entries: usize) -> TtlCache<String, u32> {
        TtlCache::new(CachePolicy { ttl_ms, max_entries })
    }

    #[test]
    fn entry_is_fresh_until_ttl_elapses() {
        let mut cache = cache(1_000, 4);
        cache.put("a".to_string(), 1, 10_000);

        assert_eq!(cache.get(&"a".to_string(), 11_000), Some(&1));
        assert_eq!(cache.get(&"a".to_string(), 11_001), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn least_recently_used_entry_is_evicted_when_full() {
        let mut cache = cache(60_000, 2);
        cache.put("a".to_string(), 1, 0);
        cache.put("b".to_string(), 2, 0);
        assert_eq!(cache.get(&"a".to_string(), 1), Some(&1));

        cache.put("c".to_string(), 3, 2);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"b".to_string(), 3), None);
        assert_eq!(cache.get(&"a".to_string(), 3), Some(&1));
        assert_eq!(cache.get(&"c".to_string(), 3), Some(&3));
    }

    #[test]
    fn put_purges_expired_entries() {
        let mut cache = cache(100, 8);
        cache.put("old".to_string(), 1, 0);
        cache.put("new".to_string(), 2, 500);

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let mut cache = cache(100, 0);
        cache.put("a".to_string(), 1, 0);
        cache.put("b".to_string(), 2, 0);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b".to_string(), 0), Some(&2));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(5);
        let other = clock.clone();
        clock.advance(10);

        assert_eq!(other.now_ms(), 15);
    }
}
