//! Cache Module
//!
//! Byte-budgeted LRU engine, the immutable value type it stores for cache
//! groups, and the lock that makes it shareable.

mod byte_view;
mod lru;
mod stats;
mod sync_cache;


// Re-export public types
pub use byte_view::ByteView;
pub use lru::{ByteSize, LruCache, OnEvicted};
pub use stats::CacheStats;
pub use sync_cache::SyncCache;
