//! HashMap-backed terminal store.
//!
//! ## Architecture
//! - Entries live in a `HashMap<K, V, S>` for O(1) lookup.
//! - Capacity is optional and enforced by entry count, not byte size.
//! - Counters track hits, misses, inserts, updates and removes.
//!
//! ## Core Operations
//! - `put`: insert or overwrite by key (fails with [`StoreFull`] only when a
//!   bound is configured and a new key would exceed it).
//! - `get`: fetch a clone of the value (updates hit/miss metrics).
//! - `remove`: delete by key.
//! - `clear`: drop all entries.
//!
//! ## Example Usage
//! ```rust
//! use softcache::store::hashmap::HashMapStore;
//! use softcache::store::traits::Cache;
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new("users");
//! store.put(1, "a".to_string()).unwrap();
//! assert_eq!(store.get(&1).unwrap(), Some("a".to_string()));
//! ```
//!
//! ## Type Constraints
//! - `K: Eq + Hash` for key lookup.
//! - `V: Clone`; decorators store cheap handles (`Arc`, `SoftEntry`) here.
//! - `S: BuildHasher` for custom hashers (defaults to `FxBuildHasher`).
//!
//! ## Thread Safety
//! - Single-threaded; wrap the stack in a
//!   [`SynchronizedCache`](crate::decorator::SynchronizedCache) to share it.
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::store::traits::{Cache, StoreFull, StoreMetrics};

/// Plain counters; the store is only reachable through `&mut self`.
#[derive(Debug, Default)]
struct StoreCounters {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    removes: u64,
}

impl StoreCounters {
    fn snapshot(&self) -> StoreMetrics {
        StoreMetrics {
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            updates: self.updates,
            removes: self.removes,
        }
    }
}

/// Single-threaded HashMap-backed store.
pub struct HashMapStore<K, V, S = FxBuildHasher> {
    id: String,
    map: HashMap<K, V, S>,
    capacity: Option<usize>,
    lock: Option<RwLock<()>>,
    metrics: StoreCounters,
}

impl<K, V> HashMapStore<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Create an unbounded store.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_hasher(id, FxBuildHasher)
    }

    /// Create a store that rejects new keys beyond `capacity` entries.
    pub fn bounded(id: impl Into<String>, capacity: usize) -> Self {
        let mut store = Self::with_hasher(id, FxBuildHasher);
        store.capacity = Some(capacity);
        store
    }
}

impl<K, V, S> HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create an unbounded store with a custom hasher.
    pub fn with_hasher(id: impl Into<String>, hasher: S) -> Self {
        Self {
            id: id.into(),
            map: HashMap::with_hasher(hasher),
            capacity: None,
            lock: None,
            metrics: StoreCounters::default(),
        }
    }

    /// Expose a read/write lock handle through [`Cache::read_write_lock`].
    pub fn with_read_write_lock(mut self) -> Self {
        self.lock = Some(RwLock::new(()));
        self
    }

    /// Return the configured entry bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Check whether a key exists without touching metrics.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Fetch a value by reference without touching metrics.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Snapshot store metrics.
    pub fn metrics(&self) -> StoreMetrics {
        self.metrics.snapshot()
    }
}

impl<K, V, S> Cache<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    type Error = StoreFull;

    fn id(&self) -> &str {
        &self.id
    }

    fn len(&mut self) -> Result<usize, StoreFull> {
        Ok(self.map.len())
    }

    fn put(&mut self, key: K, value: V) -> Result<(), StoreFull> {
        if let Some(capacity) = self.capacity
            && !self.map.contains_key(&key)
            && self.map.len() >= capacity
        {
            return Err(StoreFull);
        }
        if self.map.insert(key, value).is_some() {
            self.metrics.updates += 1;
        } else {
            self.metrics.inserts += 1;
        }
        Ok(())
    }

    fn get(&mut self, key: &K) -> Result<Option<V>, StoreFull> {
        match self.map.get(key).cloned() {
            Some(value) => {
                self.metrics.hits += 1;
                Ok(Some(value))
            },
            None => {
                self.metrics.misses += 1;
                Ok(None)
            },
        }
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, StoreFull> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.metrics.removes += 1;
        }
        Ok(removed)
    }

    fn remove_if<F>(&mut self, key: &K, pred: F) -> Result<Option<V>, StoreFull>
    where
        F: FnOnce(&V) -> bool,
    {
        if !self.map.get(key).is_some_and(pred) {
            return Ok(None);
        }
        self.remove(key)
    }

    fn clear(&mut self) -> Result<(), StoreFull> {
        self.map.clear();
        Ok(())
    }

    fn read_write_lock(&self) -> Option<&RwLock<()>> {
        self.lock.as_ref()
    }
}

impl<K, V, S> fmt::Debug for HashMapStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMapStore")
            .field("id", &self.id)
            .field("len", &self.map.len())
            .field("capacity", &self.capacity)
            .field("metrics", &self.metrics)
            .finish()
    }
}
