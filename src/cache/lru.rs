//! LRU Engine Module
//!
//! Byte-budgeted store ordered by recency of access.
//!
//! Entries live in a slab of nodes linked into a doubly-linked list, with a
//! `HashMap` from key to slab slot. Lookup, promotion and eviction are all
//! O(1); an `add` costs O(1) plus one step per entry it evicts.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

// == Byte Size ==
/// Capability every cached value must provide: its size in bytes.
pub trait ByteSize {
    fn byte_size(&self) -> usize;
}

/// Hook run once per evicted entry, with the evicted key and value.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

// == Node ==
struct Node<V> {
    key: String,
    value: V,
    /// Towards the most recently used end
    prev: Option<usize>,
    /// Towards the least recently used end
    next: Option<usize>,
}

// == LRU Cache ==
/// Least-recently-used cache bounded by a byte budget.
///
/// Each entry is charged `key.len() + value.byte_size()` bytes. A budget of
/// `0` means unbounded. Not synchronized; see [`SyncCache`](crate::cache::SyncCache).
pub struct LruCache<V: ByteSize> {
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Bytes currently charged
    nbytes: usize,
    /// Node slab; `None` marks a free slot
    nodes: Vec<Option<Node<V>>>,
    /// Free slots available for reuse
    free: Vec<usize>,
    /// Most recently used
    head: Option<usize>,
    /// Least recently used
    tail: Option<usize>,
    index: HashMap<String, usize>,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: ByteSize> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget; `0` disables eviction entirely
    /// * `on_evicted` - Optional hook, invoked after the entry has been
    ///   removed, so it never sees the evicted key as still present
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::new(),
            on_evicted,
        }
    }

    // == Get ==
    /// Looks up a key and marks it most recently used.
    ///
    /// Reads never evict.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.node(idx).map(|node| &node.value)
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts until the budget holds.
    ///
    /// An entry larger than the whole budget is still inserted and then
    /// evicted by the same loop.
    pub fn add(&mut self, key: String, value: V) {
        let new_size = value.byte_size();

        if let Some(&idx) = self.index.get(&key) {
            self.move_to_front(idx);
            if let Some(node) = self.nodes[idx].as_mut() {
                self.nbytes -= node.value.byte_size();
                self.nbytes += new_size;
                node.value = value;
            }
        } else {
            self.nbytes += key.len() + new_size;
            let idx = self.alloc(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.push_front(idx);
            self.index.insert(key, idx);
        }

        while self.max_bytes > 0 && self.nbytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    // == Remove Oldest ==
    /// Removes the least recently used entry, if any.
    pub fn remove_oldest(&mut self) {
        let Some(idx) = self.tail else {
            return;
        };

        self.unlink(idx);
        let Some(node) = self.nodes[idx].take() else {
            return;
        };
        self.free.push(idx);
        self.index.remove(&node.key);
        self.nbytes -= node.key.len() + node.value.byte_size();

        debug!(key = %node.key, bytes_used = self.nbytes, "evicted least recently used entry");

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(node.key, node.value);
        }
    }

    // == Length ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Bytes ==
    /// Returns the bytes currently charged against the budget.
    pub fn bytes(&self) -> usize {
        self.nbytes
    }

    // == Max Bytes ==
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    // == List Plumbing ==
    fn node(&self, idx: usize) -> Option<&Node<V>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn alloc(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    /// Detaches a node, leaving its slot occupied.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.nodes[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.nodes[h].as_mut() {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

impl<V: ByteSize> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("nbytes", &self.nbytes)
            .field("len", &self.index.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}
