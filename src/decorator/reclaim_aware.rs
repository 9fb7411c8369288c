//! Reclaim-aware cache decorator.
//!
//! ## Architecture
//!
//! The decorator never hands raw values to its delegate. Each `put` wraps the
//! value in a [`SoftEntry`] registered with the decorator's [`ReclaimQueue`];
//! a [`Reclaimer`] may later clear any value nobody else holds. A bounded
//! [`HotSet`] keeps strong pins to the values served most recently, which
//! shields them from reclamation.
//!
//! ```text
//!   caller ──► ReclaimAwareCache ──────────────────► delegate
//!               │   hot set: [v5, v2, v5, ...]         K ─► SoftEntry{K, Some(v)}
//!               │                                      K ─► SoftEntry{K, None}  (tombstone)
//!               └── purge: poll queue ─► remove K from delegate
//! ```
//!
//! ## Ordering
//!
//! Every operation purges first and acts second, so a lookup never reports a
//! tombstone as a hit. A tombstone whose notification has not been drained
//! yet is treated as a miss by `get` and removed on the spot.
//!
//! Evicting a pin from the hot set does not touch the delegate. The value
//! only becomes reclaimable; its entry disappears on the first operation
//! after a reclaimer actually clears it.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use softcache::decorator::ReclaimAwareCache;
//! use softcache::store::{Cache, HashMapStore};
//!
//! let store: HashMapStore<u64, _> = HashMapStore::new("users");
//! let mut cache = ReclaimAwareCache::with_hot_set_capacity(store, 0);
//! cache.put(1, Arc::new("alice".to_string())).unwrap();
//! assert_eq!(cache.get(&1).unwrap().as_deref().map(String::as_str), Some("alice"));
//!
//! // With no hot set, nothing pins the value once the caller's handle is gone.
//! assert_eq!(cache.reclaimer().reclaim_unpinned(), 1);
//! assert_eq!(cache.get(&1).unwrap(), None);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::decorator::CacheDecorator;
use crate::ds::HotSet;
use crate::reclaim::{ReclaimQueue, Reclaimer, SoftEntry};
use crate::store::traits::Cache;

/// Decorator that stores reclaimable entries and purges reclaimed ones.
pub struct ReclaimAwareCache<C, K, V> {
    delegate: C,
    hot_set: HotSet<Arc<V>>,
    queue: ReclaimQueue<K, V>,
}

impl<C, K, V> ReclaimAwareCache<C, K, V>
where
    C: Cache<K, SoftEntry<K, V>>,
{
    /// Wraps `delegate` with the default hot-set capacity.
    pub fn new(delegate: C) -> Self {
        Self {
            delegate,
            hot_set: HotSet::default(),
            queue: ReclaimQueue::new(),
        }
    }

    /// Wraps `delegate` with a hot set of `capacity` pins.
    pub fn with_hot_set_capacity(delegate: C, capacity: usize) -> Self {
        Self {
            delegate,
            hot_set: HotSet::new(capacity),
            queue: ReclaimQueue::new(),
        }
    }

    /// Reconfigures the hot-set bound; nothing is unpinned until the next hit.
    pub fn set_hot_set_capacity(&mut self, capacity: usize) {
        self.hot_set.set_capacity(capacity);
    }

    /// Returns the configured hot-set bound.
    pub fn hot_set_capacity(&self) -> usize {
        self.hot_set.capacity()
    }

    /// Number of values currently pinned.
    pub fn pinned_len(&self) -> usize {
        self.hot_set.len()
    }

    /// Handle that reclaims values stored through this decorator.
    pub fn reclaimer(&self) -> Reclaimer<K, V> {
        self.queue.reclaimer()
    }

    /// Removes delegate entries whose values have been reclaimed.
    ///
    /// Drains only the notifications that are ready now. An entry is removed
    /// only while the delegate still maps its key to that same reclaimed
    /// entry, so a value re-put under the key survives a late notification.
    /// The check goes through [`Cache::remove_if`], so it never shows up as a
    /// lookup in the layers below. If the delegate fails, the notification is
    /// requeued and the error returned.
    pub fn purge_reclaimed(&mut self) -> Result<usize, C::Error> {
        let mut purged = 0;
        while let Some(notified) = self.queue.poll() {
            let removed = self
                .delegate
                .remove_if(notified.key(), |current| current.same_entry(&notified));
            match removed {
                Ok(Some(_)) => purged += 1,
                Ok(None) => {},
                Err(err) => {
                    self.queue.requeue(notified);
                    return Err(err);
                },
            }
        }
        if purged > 0 {
            tracing::debug!(
                cache = self.delegate.id(),
                purged,
                "purged reclaimed cache entries"
            );
        }
        Ok(purged)
    }
}

impl<C, K, V> Cache<K, Arc<V>> for ReclaimAwareCache<C, K, V>
where
    C: Cache<K, SoftEntry<K, V>>,
    K: Clone,
{
    type Error = C::Error;

    fn id(&self) -> &str {
        self.delegate.id()
    }

    fn len(&mut self) -> Result<usize, C::Error> {
        self.purge_reclaimed()?;
        self.delegate.len()
    }

    fn put(&mut self, key: K, value: Arc<V>) -> Result<(), C::Error> {
        self.purge_reclaimed()?;
        let entry = self.queue.register(key.clone(), value);
        self.delegate.put(key, entry)
    }

    fn get(&mut self, key: &K) -> Result<Option<Arc<V>>, C::Error> {
        self.purge_reclaimed()?;
        let Some(entry) = self.delegate.get(key)? else {
            return Ok(None);
        };
        match entry.get() {
            Some(value) => {
                self.hot_set.pin(Arc::clone(&value));
                Ok(Some(value))
            },
            None => {
                tracing::trace!(cache = self.delegate.id(), "dropping reclaimed entry on lookup");
                self.delegate.remove(key)?;
                Ok(None)
            },
        }
    }

    fn remove(&mut self, key: &K) -> Result<Option<Arc<V>>, C::Error> {
        self.purge_reclaimed()?;
        Ok(self.delegate.remove(key)?.and_then(|entry| entry.get()))
    }

    fn remove_if<F>(&mut self, key: &K, pred: F) -> Result<Option<Arc<V>>, C::Error>
    where
        F: FnOnce(&Arc<V>) -> bool,
    {
        self.purge_reclaimed()?;
        let removed = self
            .delegate
            .remove_if(key, |entry| entry.get().is_some_and(|value| pred(&value)))?;
        Ok(removed.and_then(|entry| entry.get()))
    }

    fn clear(&mut self) -> Result<(), C::Error> {
        self.hot_set.clear();
        self.purge_reclaimed()?;
        self.delegate.clear()
    }

    fn read_write_lock(&self) -> Option<&RwLock<()>> {
        self.delegate.read_write_lock()
    }
}

impl<C, K, V> CacheDecorator for ReclaimAwareCache<C, K, V> {
    type Inner = C;

    fn inner(&self) -> &C {
        &self.delegate
    }

    fn inner_mut(&mut self) -> &mut C {
        &mut self.delegate
    }

    fn into_inner(self) -> C {
        self.delegate
    }
}

impl<C: fmt::Debug, K, V> fmt::Debug for ReclaimAwareCache<C, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReclaimAwareCache")
            .field("delegate", &self.delegate)
            .field("pinned", &self.hot_set.len())
            .field("hot_set_capacity", &self.hot_set.capacity())
            .field("queue", &self.queue)
            .finish()
    }
}
