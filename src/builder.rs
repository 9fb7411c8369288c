//! Builder for the standard reclaim-aware cache stack.
//!
//! Assembles, from the outside in:
//!
//! ```text
//!   LoggingCache ──► ReclaimAwareCache ──► HashMapStore
//! ```
//!
//! Configuration is programmatic; there is no file format.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use softcache::builder::CacheBuilder;
//! use softcache::key::CompositeKey;
//! use softcache::store::Cache;
//!
//! let mut cache = CacheBuilder::new("statements")
//!     .hot_set_capacity(64)
//!     .build::<CompositeKey, String>();
//!
//! let key: CompositeKey = ["select", "users"].into_iter().collect();
//! cache.put(key.clone(), Arc::new("row".to_string())).unwrap();
//! assert!(cache.get(&key).unwrap().is_some());
//! ```

use std::hash::Hash;

use crate::decorator::{CacheDecorator, LoggingCache, ReclaimAwareCache};
use crate::ds::DEFAULT_HOT_SET_CAPACITY;
use crate::error::ConfigError;
use crate::reclaim::{Reclaimer, SoftEntry};
use crate::store::hashmap::HashMapStore;

/// Cache stack produced by [`CacheBuilder`].
pub type StandardCache<K, V> =
    LoggingCache<ReclaimAwareCache<HashMapStore<K, SoftEntry<K, V>>, K, V>, K, std::sync::Arc<V>>;

/// Configures and builds a [`StandardCache`].
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    id: String,
    hot_set_capacity: usize,
    store_capacity: Option<usize>,
}

impl CacheBuilder {
    /// Starts a builder for a cache identified by `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hot_set_capacity: DEFAULT_HOT_SET_CAPACITY,
            store_capacity: None,
        }
    }

    /// Number of recently read values pinned against reclamation.
    pub fn hot_set_capacity(mut self, capacity: usize) -> Self {
        self.hot_set_capacity = capacity;
        self
    }

    /// Bounds the store to `capacity` entries (unbounded by default).
    pub fn store_capacity(mut self, capacity: usize) -> Self {
        self.store_capacity = Some(capacity);
        self
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; see [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> StandardCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }

    /// Builds the cache, rejecting an empty id or a zero store bound.
    pub fn try_build<K, V>(self) -> Result<StandardCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        if self.id.is_empty() {
            return Err(ConfigError::new("cache id must not be empty"));
        }
        if self.store_capacity == Some(0) {
            return Err(ConfigError::new("store capacity must be > 0"));
        }
        tracing::debug!(
            cache = %self.id,
            hot_set_capacity = self.hot_set_capacity,
            store_capacity = ?self.store_capacity,
            "building reclaim-aware cache"
        );
        let store = match self.store_capacity {
            Some(capacity) => HashMapStore::bounded(self.id, capacity),
            None => HashMapStore::new(self.id),
        };
        Ok(LoggingCache::new(ReclaimAwareCache::with_hot_set_capacity(
            store,
            self.hot_set_capacity,
        )))
    }
}

/// Returns the reclaimer of a [`StandardCache`].
pub fn reclaimer_of<K, V>(cache: &StandardCache<K, V>) -> Reclaimer<K, V>
where
    K: Eq + Hash + Clone,
{
    cache.inner().reclaimer()
}
