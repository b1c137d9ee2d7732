//! Group Registry
//!
//! Owned name → group map. Applications construct one and share it; there
//! is no process-global instance.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::group::{Getter, Group};

// == Group Registry ==
/// Registry of cache groups, keyed by unique name.
///
/// Lookups take a shared read lock and never block one another;
/// registration takes the write lock. This lock is separate from every
/// group's own cache lock.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group and registers it under `name`.
    ///
    /// An existing group with the same name is replaced; holders of the old
    /// `Arc` keep using it, but lookups now return the new one.
    ///
    /// # Arguments
    /// * `name` - Registry key for the group
    /// * `cache_bytes` - Byte budget of the group's cache (0 = unbounded)
    /// * `getter` - Loader called on cache misses
    pub fn new_group(
        &self,
        name: impl Into<String>,
        cache_bytes: usize,
        getter: impl Getter + 'static,
    ) -> Arc<Group> {
        let name = name.into();
        let group = Arc::new(Group::new(name.clone(), cache_bytes, Box::new(getter)));

        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        if groups.insert(name.clone(), Arc::clone(&group)).is_some() {
            warn!(group = %name, "replaced existing cache group");
        } else {
            info!(group = %name, cache_bytes, "registered cache group");
        }

        group
    }

    // == Get Group ==
    /// Looks up a group by name. Never creates one.
    pub fn get_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    // == Names ==
    /// Returns registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.groups
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: &'static str) -> impl Getter {
        move |_: &str| -> anyhow::Result<Vec<u8>> { Ok(value.as_bytes().to_vec()) }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = GroupRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_group("scores").is_none());
    }

    #[test]
    fn test_new_group_then_get_group() {
        let registry = GroupRegistry::new();

        let created = registry.new_group("scores", 1024, constant("1"));
        let found = registry.get_group("scores").unwrap();

        assert!(Arc::ptr_eq(&created, &found));
        assert_eq!(found.name(), "scores");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_group_does_not_create() {
        let registry = GroupRegistry::new();

        assert!(registry.get_group("missing").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_new_group_replaces_same_name() {
        let registry = GroupRegistry::new();

        let old = registry.new_group("dup", 0, constant("old"));
        let new = registry.new_group("dup", 0, constant("new"));

        let found = registry.get_group("dup").unwrap();
        assert!(Arc::ptr_eq(&found, &new));
        assert!(!Arc::ptr_eq(&found, &old));
        assert_eq!(registry.len(), 1);

        assert_eq!(found.get("k").unwrap().to_string(), "new");
        assert_eq!(old.get("k").unwrap().to_string(), "old");
    }

    #[test]
    fn test_names_sorted() {
        let registry = GroupRegistry::new();

        registry.new_group("b", 0, constant("x"));
        registry.new_group("a", 0, constant("x"));
        registry.new_group("c", 0, constant("x"));

        assert_eq!(registry.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_registries_are_independent() {
        let first = GroupRegistry::new();
        let second = GroupRegistry::new();

        first.new_group("only-here", 0, constant("x"));

        assert!(first.get_group("only-here").is_some());
        assert!(second.get_group("only-here").is_none());
    }
}
