//! Bounded least-recently-used cache with lazy eviction.
//!
//! Recency is tracked through a queue of `(stamp, key)` records rather than
//! a linked list: every touch pushes a fresh record and bumps the entry's
//! stamp, leaving the old record in place as a stale marker. Eviction pops
//! from the front and skips records whose stamp no longer matches, and the
//! queue is compacted once it grows well past capacity.

use std::collections::VecDeque;
use std::hash::Hash;

use ahash::AHashMap;

/// Queue length relative to capacity at which stale records are swept out.
const COMPACTION_FACTOR: usize = 4;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stamp: u64,
}

/// A fixed-capacity LRU cache.
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: AHashMap<K, Entry<V>>,
    order: VecDeque<(u64, K)>,
    capacity: usize,
    clock: u64,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        LruCache {
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::new(),
            capacity,
            clock: 0,
        }
    }

    /// Look up a key, marking it most recently used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.clock += 1;
        let stamp = self.clock;

        let entry = self.entries.get_mut(key)?;
        entry.stamp = stamp;
        self.order.push_back((stamp, key.clone()));
        self.compact_if_needed();

        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert or overwrite a key, evicting the least recently used entries
    /// if the cache is over capacity.
    pub fn insert(&mut self, key: K, value: V) {
        self.clock += 1;
        let stamp = self.clock;

        self.order.push_back((stamp, key.clone()));
        self.entries.insert(key, Entry { value, stamp });

        self.evict_to_capacity();
        self.compact_if_needed();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries the cache will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_to_capacity(&mut self) {
        // Every live entry owns exactly one record with a matching stamp,
        // so popping eventually reaches a live record.
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some((stamp, key)) => {
                    if self.entries.get(&key).is_some_and(|e| e.stamp == stamp) {
                        self.entries.remove(&key);
                    }
                }
                None => break,
            }
        }
    }

    fn compact_if_needed(&mut self) {
        if self.order.len() >= self.capacity.saturating_mul(COMPACTION_FACTOR) {
            let entries = &self.entries;
            self.order
                .retain(|(stamp, key)| entries.get(key).is_some_and(|e| e.stamp == *stamp));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = LruCache::new(4);
        assert!(cache.is_empty());

        cache.insert("a", 1);
        cache.insert("b", 2);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // Touch "a" so "b" becomes the eviction victim.
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_overwrite_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);

        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_compaction_keeps_live_entries() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // Repeated hits pile up stale records until compaction sweeps them.
        for _ in 0..100 {
            assert_eq!(cache.get(&"a"), Some(&1));
            assert_eq!(cache.get(&"b"), Some(&2));
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.order.len() < cache.capacity() * COMPACTION_FACTOR);
        cache.insert("c", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);

        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b"), Some(&2));
    }
}
