//! Lock-wrapped cache for sharing a decorator stack across threads.
//!
//! [`Cache`] takes `&mut self` because decorators mutate bookkeeping even on
//! reads (purging, hot-set pins, counters). [`SynchronizedCache`] puts the
//! whole stack behind one `parking_lot::Mutex` and exposes the same
//! operations through `&self` via [`ConcurrentCache`].
//!
//! A reclaim-aware layer inside the mutex keeps a single hot set shared by
//! every thread; pins made by one thread protect values for all of them.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use softcache::decorator::{ConcurrentCache, SynchronizedCache};
//! use softcache::store::HashMapStore;
//!
//! let store: HashMapStore<u64, u64> = HashMapStore::new("shared");
//! let cache = Arc::new(SynchronizedCache::new(store));
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || cache.put(t, t * 10).unwrap())
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len().unwrap(), 4);
//! ```

use std::fmt;

use parking_lot::{Mutex, MutexGuard};

use crate::store::traits::Cache;

/// Thread-safe mirror of [`Cache`] with interior mutability.
pub trait ConcurrentCache<K, V>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier of the cache.
    fn id(&self) -> &str;

    /// Current number of entries.
    fn len(&self) -> Result<usize, Self::Error>;

    /// Check if the cache is empty.
    fn is_empty(&self) -> Result<bool, Self::Error> {
        Ok(self.len()? == 0)
    }

    /// Insert or overwrite a value.
    fn put(&self, key: K, value: V) -> Result<(), Self::Error>;

    /// Fetch a value by key; `Ok(None)` is a miss.
    fn get(&self, key: &K) -> Result<Option<V>, Self::Error>;

    /// Remove a value by key, returning it if present.
    fn remove(&self, key: &K) -> Result<Option<V>, Self::Error>;

    /// Remove all entries.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Serializes every operation on the wrapped cache through one mutex.
pub struct SynchronizedCache<C> {
    id: String,
    delegate: Mutex<C>,
}

impl<C> SynchronizedCache<C> {
    /// Wraps `delegate`; its id is captured once.
    pub fn new<K, V>(delegate: C) -> Self
    where
        C: Cache<K, V>,
    {
        Self {
            id: delegate.id().to_owned(),
            delegate: Mutex::new(delegate),
        }
    }

    /// Locks the wrapped cache for a compound operation.
    pub fn lock(&self) -> MutexGuard<'_, C> {
        self.delegate.lock()
    }

    /// Unwraps the lock, returning the wrapped cache.
    pub fn into_inner(self) -> C {
        self.delegate.into_inner()
    }
}

impl<C, K, V> ConcurrentCache<K, V> for SynchronizedCache<C>
where
    C: Cache<K, V> + Send,
{
    type Error = C::Error;

    fn id(&self) -> &str {
        &self.id
    }

    fn len(&self) -> Result<usize, C::Error> {
        self.delegate.lock().len()
    }

    fn put(&self, key: K, value: V) -> Result<(), C::Error> {
        self.delegate.lock().put(key, value)
    }

    fn get(&self, key: &K) -> Result<Option<V>, C::Error> {
        self.delegate.lock().get(key)
    }

    fn remove(&self, key: &K) -> Result<Option<V>, C::Error> {
        self.delegate.lock().remove(key)
    }

    fn clear(&self) -> Result<(), C::Error> {
        self.delegate.lock().clear()
    }
}

impl<C: fmt::Debug> fmt::Debug for SynchronizedCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynchronizedCache")
            .field("id", &self.id)
            .field("delegate", &self.delegate)
            .finish()
    }
}
