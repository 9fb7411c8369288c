//! The store contract shared by terminal stores and decorators.
//!
//! Stores focus on key/value ownership and lookup semantics. Decorators wrap
//! a store, implement the very same [`Cache`] trait and forward to their
//! delegate, so any number of them can be stacked without a type hierarchy:
//!
//! ```text
//!   LoggingCache ──► ReclaimAwareCache ──► HashMapStore
//!   Cache<K, Arc<V>>  Cache<K, Arc<V>>      Cache<K, SoftEntry<K, V>>
//! ```
//!
//! Every operation returns `Result<_, Self::Error>`; a decorator declares
//! `type Error = C::Error` and propagates its delegate's failures untouched.

use parking_lot::RwLock;
use thiserror::Error;

/// Snapshot of store-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreMetrics {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
}

/// Error returned when a bounded store is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("store is full")]
pub struct StoreFull;

/// Core operations every store and every decorator provides.
///
/// Methods take `&mut self`: a decorator may do bookkeeping (purging,
/// pinning, counting) even on reads. Use
/// [`SynchronizedCache`](crate::decorator::SynchronizedCache) to share a
/// stack across threads.
pub trait Cache<K, V> {
    /// Failure type of this store; decorators reuse their delegate's.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Identifier of the cache (usually the namespace it serves).
    fn id(&self) -> &str;

    /// Current number of entries.
    fn len(&mut self) -> Result<usize, Self::Error>;

    /// Check if the cache is empty.
    fn is_empty(&mut self) -> Result<bool, Self::Error> {
        Ok(self.len()? == 0)
    }

    /// Insert or overwrite a value.
    fn put(&mut self, key: K, value: V) -> Result<(), Self::Error>;

    /// Fetch a value by key; `Ok(None)` is a miss.
    fn get(&mut self, key: &K) -> Result<Option<V>, Self::Error>;

    /// Remove a value by key, returning it if present.
    fn remove(&mut self, key: &K) -> Result<Option<V>, Self::Error>;

    /// Remove the value under `key` only if `pred` accepts it.
    ///
    /// Unlike a `get` followed by `remove`, this is not a lookup: stores and
    /// decorators must not count it as a request, hit or miss. The default
    /// falls back to `get` for stores that cannot inspect in place.
    fn remove_if<F>(&mut self, key: &K, pred: F) -> Result<Option<V>, Self::Error>
    where
        F: FnOnce(&V) -> bool,
    {
        let Some(current) = self.get(key)? else {
            return Ok(None);
        };
        if pred(&current) {
            self.remove(key)
        } else {
            Ok(None)
        }
    }

    /// Remove all entries.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Lock callers may coordinate around, if the store offers one.
    ///
    /// The cache never takes this lock itself.
    fn read_write_lock(&self) -> Option<&RwLock<()>> {
        None
    }
}
