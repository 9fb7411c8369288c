//! Hit-ratio logging decorator.
//!
//! Counts lookups and hits and emits the running hit ratio at `debug` level
//! after every `get`. All other operations, `remove_if` included, are forwarded
//! untouched and never counted.

use std::fmt;
use std::marker::PhantomData;

use parking_lot::RwLock;

use crate::decorator::CacheDecorator;
use crate::store::traits::Cache;

/// Decorator that reports the hit ratio of the cache beneath it.
pub struct LoggingCache<C, K, V> {
    delegate: C,
    requests: u64,
    hits: u64,
    _marker: PhantomData<fn(K) -> V>,
}

impl<C, K, V> LoggingCache<C, K, V>
where
    C: Cache<K, V>,
{
    /// Wraps `delegate`.
    pub fn new(delegate: C) -> Self {
        Self {
            delegate,
            requests: 0,
            hits: 0,
            _marker: PhantomData,
        }
    }

    /// Number of lookups seen so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Number of lookups that returned a value.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Fraction of lookups that hit; `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }
}

impl<C, K, V> Cache<K, V> for LoggingCache<C, K, V>
where
    C: Cache<K, V>,
{
    type Error = C::Error;

    fn id(&self) -> &str {
        self.delegate.id()
    }

    fn len(&mut self) -> Result<usize, C::Error> {
        self.delegate.len()
    }

    fn put(&mut self, key: K, value: V) -> Result<(), C::Error> {
        self.delegate.put(key, value)
    }

    fn get(&mut self, key: &K) -> Result<Option<V>, C::Error> {
        self.requests += 1;
        let value = self.delegate.get(key)?;
        if value.is_some() {
            self.hits += 1;
        }
        tracing::debug!(
            cache = self.delegate.id(),
            hit = value.is_some(),
            hit_ratio = self.hit_ratio(),
            "cache lookup"
        );
        Ok(value)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, C::Error> {
        self.delegate.remove(key)
    }

    fn remove_if<F>(&mut self, key: &K, pred: F) -> Result<Option<V>, C::Error>
    where
        F: FnOnce(&V) -> bool,
    {
        self.delegate.remove_if(key, pred)
    }

    fn clear(&mut self) -> Result<(), C::Error> {
        self.delegate.clear()
    }

    fn read_write_lock(&self) -> Option<&RwLock<()>> {
        self.delegate.read_write_lock()
    }
}

impl<C, K, V> CacheDecorator for LoggingCache<C, K, V> {
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

impl<C: fmt::Debug, K, V> fmt::Debug for LoggingCache<C, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingCache")
            .field("delegate", &self.delegate)
            .field("requests", &self.requests)
            .field("hits", &self.hits)
            .finish()
    }
}
