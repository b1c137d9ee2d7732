//! Cache Group
//!
//! Named cache-aside coordinator: serve from the cache, otherwise load from
//! the group's [`Getter`] and remember the result.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, SyncCache};
use crate::error::{CacheError, Result};
use crate::group::Getter;

// == Group ==
/// A named cache with a loader behind it.
///
/// Groups are created and looked up through a
/// [`GroupRegistry`](crate::group::GroupRegistry).
///
/// Concurrent misses on one key are not coalesced: each caller runs the
/// loader and the last write wins.
pub struct Group {
    name: String,
    getter: Box<dyn Getter>,
    main_cache: SyncCache,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl Group {
    pub(crate) fn new(name: String, cache_bytes: usize, getter: Box<dyn Getter>) -> Self {
        Self {
            name,
            getter,
            main_cache: SyncCache::new(cache_bytes),
            loads: AtomicU64::new(0),
            load_errors: AtomicU64::new(0),
        }
    }

    // == Name ==
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// # Errors
    /// - [`CacheError::EmptyKey`] if `key` is empty; nothing is consulted.
    /// - [`CacheError::Load`] wrapping the loader's own error. Nothing is
    ///   cached, so the next call loads again.
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.load(key)
    }

    // == Stats ==
    /// Returns a snapshot of this group's counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.main_cache.stats();
        stats.loads = self.loads.load(Ordering::Relaxed);
        stats.load_errors = self.load_errors.load(Ordering::Relaxed);
        stats
    }

    fn load(&self, key: &str) -> Result<ByteView> {
        debug!(group = %self.name, key, "cache miss, loading");
        self.loads.fetch_add(1, Ordering::Relaxed);

        let bytes = self.getter.get(key).map_err(|source| {
            self.load_errors.fetch_add(1, Ordering::Relaxed);
            warn!(group = %self.name, key, error = %source, "loader failed");
            CacheError::Load {
                key: key.to_string(),
                source,
            }
        })?;

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn counting_group(cache_bytes: usize) -> (Group, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let getter = move |key: &str| -> anyhow::Result<Vec<u8>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(format!("value-for-{key}").into_bytes())
        };
        (
            Group::new("test".to_string(), cache_bytes, Box::new(getter)),
            calls,
        )
    }

    #[test]
    fn test_get_loads_then_hits() {
        let (group, calls) = counting_group(1 << 20);

        let first = group.get("k1").unwrap();
        assert_eq!(first.to_string(), "value-for-k1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = group.get("k1").unwrap();
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_empty_key_never_loads() {
        let (group, calls) = counting_group(1 << 20);

        let result = group.get("");

        assert!(matches!(result, Err(CacheError::EmptyKey)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(group.stats(), CacheStats::default());
    }

    #[test]
    fn test_returned_value_is_detached_from_cache() {
        let (group, _) = counting_group(1 << 20);

        let mut bytes = group.get("k").unwrap().byte_slice();
        bytes.clear();

        assert_eq!(group.get("k").unwrap().to_string(), "value-for-k");
    }

    #[test]
    fn test_tiny_budget_reloads_evicted_keys() {
        // Each entry is 1 + 11 = 12 bytes; only one fits
        let (group, calls) = counting_group(20);

        group.get("a").unwrap();
        group.get("b").unwrap();
        group.get("a").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_stats_count_loads_and_hits() {
        let (group, _) = counting_group(1 << 20);

        group.get("a").unwrap();
        group.get("a").unwrap();
        group.get("b").unwrap();

        let stats = group.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.loads, 2);
        assert_eq!(stats.load_errors, 0);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_load_failure_is_not_cached() {
        let getter = |key: &str| -> anyhow::Result<Vec<u8>> { anyhow::bail!("{key} not exist") };
        let group = Group::new("failing".to_string(), 0, Box::new(getter));

        for _ in 0..2 {
            let err = group.get("bad").unwrap_err();
            assert_eq!(err.load_error().unwrap().to_string(), "bad not exist");
        }

        let stats = group.stats();
        assert_eq!(stats.loads, 2);
        assert_eq!(stats.load_errors, 2);
        assert_eq!(stats.total_entries, 0);
    }
}
