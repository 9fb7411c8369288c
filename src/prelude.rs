pub use crate::builder::{CacheBuilder, StandardCache};
pub use crate::decorator::{CacheDecorator, LoggingCache, ReclaimAwareCache};
#[cfg(feature = "concurrency")]
pub use crate::decorator::{ConcurrentCache, SynchronizedCache};
pub use crate::ds::HotSet;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::key::{CompositeKey, KeyValue};
pub use crate::reclaim::{ReclaimQueue, Reclaimer, SoftEntry};
pub use crate::store::{Cache, HashMapStore, StoreFull, StoreMetrics};
