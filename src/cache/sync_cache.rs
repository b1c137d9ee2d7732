//! Synchronized Cache Module
//!
//! Mutex-guarded, lazily constructed LRU engine holding [`ByteView`] values.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::{ByteView, CacheStats, LruCache};

#[derive(Debug, Default)]
struct Inner {
    /// Built on first `add`
    lru: Option<LruCache<ByteView>>,
    stats: CacheStats,
}

// == Sync Cache ==
/// Thread-safe wrapper around one [`LruCache`].
///
/// A single mutex serializes every read and write, since a read also
/// reorders recency. The engine is only allocated on the first write, so a
/// group that is never populated costs nothing beyond this struct.
#[derive(Debug)]
pub struct SyncCache {
    /// Budget handed to the engine when it is built
    cache_bytes: usize,
    inner: Mutex<Inner>,
}

impl SyncCache {
    // == Constructor ==
    /// Creates an empty cache with the given byte budget (0 = unbounded).
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            inner: Mutex::new(Inner::default()),
        }
    }

    // == Add ==
    /// Stores a value, building the engine first if needed.
    pub fn add(&self, key: &str, value: ByteView) {
        let mut inner = self.lock();
        let cache_bytes = self.cache_bytes;
        inner
            .lru
            .get_or_insert_with(|| LruCache::new(cache_bytes, None))
            .add(key.to_string(), value);
    }

    // == Get ==
    /// Looks up a value, returning a copy that shares nothing with the cache.
    ///
    /// Never builds the engine; before the first `add` every lookup misses.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.lock();
        let value = inner.lru.as_mut().and_then(|lru| lru.get(key).cloned());
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        value
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.lock().lru.as_ref().map_or(0, LruCache::len)
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Bytes ==
    /// Returns bytes currently charged, 0 before the engine exists.
    pub fn bytes(&self) -> usize {
        self.lock().lru.as_ref().map_or(0, LruCache::bytes)
    }

    // == Stats ==
    /// Returns hit/miss counters together with the current engine size.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        if let Some(lru) = inner.lru.as_ref() {
            stats.total_entries = lru.len();
            stats.bytes_used = lru.bytes();
        }
        stats
    }

    /// Engine operations finish their bookkeeping before anything can
    /// panic, so a poisoned lock still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
