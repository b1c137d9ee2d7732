//! Mini Groupcache - An in-process, byte-budgeted LRU cache
//!
//! Provides named cache-aside groups that load missing values from a
//! caller-supplied source and keep them under LRU eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;

pub use api::AppState;
pub use cache::ByteView;
pub use config::Config;
pub use error::CacheError;
pub use group::{Getter, GetterFn, Group, GroupRegistry};
