//! Match cache
//!
//! Bounded `tag → value` memo with insertion-order (FIFO) eviction. A hit does
//! not refresh an entry's position, so the oldest inserted key is always the
//! next to go.
//!
//! # Design
//!
//! One mutex covers lookup, computation and insertion. Concurrent first-time
//! lookups of the same tag therefore compute the value once; the cost is that
//! computation for unrelated tags is serialized behind it. Tags are a small
//! fixed set in practice, so misses are rare after warm-up.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Default number of cached tags
pub const MATCH_CACHE_SIZE: usize = 1024;

/// FIFO-bounded memo keyed by tag
#[derive(Debug)]
pub struct MatchCache<V> {
    inner: Mutex<CacheInner<V>>,
    capacity: usize,
    stats: CacheStats,
}

#[derive(Debug)]
struct CacheInner<V> {
    map: HashMap<String, V>,
    keys: VecDeque<String>,
}

impl<V: Clone> MatchCache<V> {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(CacheInner {
                map: HashMap::with_capacity(capacity.min(MATCH_CACHE_SIZE)),
                keys: VecDeque::with_capacity(capacity.min(MATCH_CACHE_SIZE)),
            }),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Return the cached value for `key`, computing and inserting it on miss
    ///
    /// `compute` runs while the cache lock is held and must not call back
    /// into this cache.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut inner = self.inner.lock();

        if let Some(value) = inner.map.get(key) {
            self.stats.hit();
            return value.clone();
        }
        self.stats.miss();

        let value = compute();

        if inner.keys.len() >= self.capacity
            && let Some(oldest) = inner.keys.pop_front()
        {
            inner.map.remove(&oldest);
            self.stats.evict();
            tracing::debug!(tag = %oldest, "evicted match cache entry");
        }

        inner.keys.push_back(key.to_string());
        inner.map.insert(key.to_string(), value.clone());
        value
    }

    /// Look up without computing; does not touch statistics
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().map.get(key).cloned()
    }

    /// Whether `key` is cached
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().map.contains_key(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().keys.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached keys, oldest first
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys.iter().cloned().collect()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.keys.clear();
    }

    /// Hit/miss/eviction counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<V: Clone> Default for MatchCache<V> {
    fn default() -> Self {
        Self::new(MATCH_CACHE_SIZE)
    }
}

/// Cache counters
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    #[inline]
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn evict(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStatsSnapshot {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
