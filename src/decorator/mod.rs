//! Stackable cache decorators.
//!
//! A decorator owns an inner cache, implements [`Cache`] itself and forwards
//! every operation it does not intercept. Because each layer only depends on
//! the [`Cache`] trait of the layer beneath it, layers compose in any order:
//!
//! ```text
//!   SynchronizedCache<LoggingCache<ReclaimAwareCache<HashMapStore<K, SoftEntry<K, V>>, K, V>>>
//! ```
//!
//! [`CacheDecorator`] gives uniform access to the wrapped layer.
//!
//! [`Cache`]: crate::store::traits::Cache

pub mod logging;
pub mod reclaim_aware;
#[cfg(feature = "concurrency")]
pub mod synchronized;

pub use logging::LoggingCache;
pub use reclaim_aware::ReclaimAwareCache;
#[cfg(feature = "concurrency")]
pub use synchronized::{ConcurrentCache, SynchronizedCache};

/// Access to the layer a decorator wraps.
pub trait CacheDecorator {
    /// The wrapped cache.
    type Inner;

    /// Borrow the wrapped cache.
    fn inner(&self) -> &Self::Inner;

    /// Mutably borrow the wrapped cache.
    ///
    /// Writing through this handle bypasses the decorator's bookkeeping.
    fn inner_mut(&mut self) -> &mut Self::Inner;

    /// Unwrap the decorator, returning the wrapped cache.
    fn into_inner(self) -> Self::Inner;
}
