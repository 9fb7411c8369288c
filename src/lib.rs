//! softcache: composite cache keys and a reclaim-aware cache decorator.
//!
//! See `DESIGN.md` for the internal architecture and invariants.

pub mod builder;
pub mod decorator;
pub mod ds;
pub mod error;
pub mod key;
pub mod prelude;
pub mod reclaim;
pub mod store;

pub use crate::builder::{CacheBuilder, StandardCache};
pub use crate::decorator::{CacheDecorator, LoggingCache, ReclaimAwareCache};
#[cfg(feature = "concurrency")]
pub use crate::decorator::{ConcurrentCache, SynchronizedCache};
pub use crate::key::{CompositeKey, KeyValue};
pub use crate::reclaim::{Reclaimer, SoftEntry};
pub use crate::store::{Cache, HashMapStore};
