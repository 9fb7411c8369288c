//! Reclaimable cache entries and the notification queue behind them.
//!
//! Rust has no collector that clears references under memory pressure, so
//! this module models one explicitly:
//!
//! - a [`SoftEntry`] is the indirection a store keeps instead of the value;
//!   it owns the value until a reclaimer clears it, after which it is a
//!   tombstone;
//! - a [`ReclaimQueue`] is owned by the decorator; it registers entries and
//!   hands out the notifications produced by reclamation, without blocking;
//! - a [`Reclaimer`] is the cloneable handle that plays the collector. It may
//!   live on any thread and decides *when* to reclaim, but it can only clear
//!   values nobody else holds: a value is pinned while any other `Arc`
//!   (a hot-set pin, a caller's handle) is alive.
//!
//! ## Lifecycle
//!
//! ```text
//!   register(k, v) ──► SoftEntry{k, Some(v)} ──► stored by the delegate
//!                               │
//!          Reclaimer::reclaim_* │  strong_count(v) == 1
//!                               ▼
//!                      SoftEntry{k, None}  ──► notification queued
//!                                                     │
//!                      ReclaimQueue::poll() ◄─────────┘  (drained by purge)
//! ```
//!
//! Exactly one notification is produced per reclaimed entry.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Registry size at which dead registrations are first swept on insert.
const MIN_PRUNE_THRESHOLD: usize = 64;

struct Slot<K, V> {
    key: K,
    value: Mutex<Option<Arc<V>>>,
}

/// Store-side indirection to a reclaimable value.
pub struct SoftEntry<K, V> {
    slot: Arc<Slot<K, V>>,
}

impl<K, V> SoftEntry<K, V> {
    /// Key this entry was registered under.
    pub fn key(&self) -> &K {
        &self.slot.key
    }

    /// Returns a strong handle to the value, or `None` once reclaimed.
    pub fn get(&self) -> Option<Arc<V>> {
        self.slot.value.lock().clone()
    }

    /// Returns `true` once the value has been reclaimed.
    pub fn is_reclaimed(&self) -> bool {
        self.slot.value.lock().is_none()
    }

    /// Returns `true` if both handles refer to the same registration.
    pub fn same_entry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<K, V> Clone for SoftEntry<K, V> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for SoftEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftEntry")
            .field("key", &self.slot.key)
            .field("reclaimed", &self.is_reclaimed())
            .finish()
    }
}

struct Shared<K, V> {
    /// Registrations in insertion order; dead ones are pruned lazily.
    registry: Mutex<Registry<K, V>>,
    notifications: Mutex<VecDeque<SoftEntry<K, V>>>,
}

struct Registry<K, V> {
    slots: VecDeque<Weak<Slot<K, V>>>,
    prune_threshold: usize,
}

/// Decorator-side end of the reclamation machinery.
pub struct ReclaimQueue<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> ReclaimQueue<K, V> {
    /// Creates an empty queue with no registrations.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry {
                    slots: VecDeque::new(),
                    prune_threshold: MIN_PRUNE_THRESHOLD,
                }),
                notifications: Mutex::new(VecDeque::new()),
            }),
        }
    }

    /// Wraps `value` in a new entry that reclaimers can clear.
    pub fn register(&self, key: K, value: Arc<V>) -> SoftEntry<K, V> {
        let slot = Arc::new(Slot {
            key,
            value: Mutex::new(Some(value)),
        });

        let mut registry = self.shared.registry.lock();
        if registry.slots.len() >= registry.prune_threshold {
            registry.slots.retain(|weak| weak.strong_count() > 0);
            registry.prune_threshold = (registry.slots.len() * 2).max(MIN_PRUNE_THRESHOLD);
        }
        registry.slots.push_back(Arc::downgrade(&slot));

        SoftEntry { slot }
    }

    /// Takes the next ready notification, if any. Never blocks.
    pub fn poll(&self) -> Option<SoftEntry<K, V>> {
        self.shared.notifications.lock().pop_front()
    }

    /// Puts a polled notification back at the head of the queue.
    ///
    /// Used when acting on a notification failed, so the next drain sees it
    /// again before anything reclaimed later.
    pub fn requeue(&self, notification: SoftEntry<K, V>) {
        self.shared.notifications.lock().push_front(notification);
    }

    /// Returns a handle that can reclaim values registered here.
    pub fn reclaimer(&self) -> Reclaimer<K, V> {
        Reclaimer {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> Default for ReclaimQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ReclaimQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReclaimQueue")
            .field("registered", &self.shared.registry.lock().slots.len())
            .field("pending", &self.shared.notifications.lock().len())
            .finish()
    }
}

/// Collector-side handle: clears unpinned values and queues notifications.
pub struct Reclaimer<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Reclaimer<K, V> {
    /// Reclaims every value that nothing outside its entry holds.
    pub fn reclaim_unpinned(&self) -> usize {
        self.reclaim_oldest(usize::MAX)
    }

    /// Reclaims at most `max` unpinned values, oldest registration first.
    pub fn reclaim_oldest(&self, max: usize) -> usize {
        let mut reclaimed = Vec::new();
        {
            let mut registry = self.shared.registry.lock();
            registry.slots.retain(|weak| {
                let Some(slot) = weak.upgrade() else {
                    return false;
                };
                if reclaimed.len() >= max {
                    return true;
                }
                {
                    let mut value = slot.value.lock();
                    let pinned = match value.as_ref() {
                        None => return false,
                        Some(v) => Arc::strong_count(v) > 1,
                    };
                    if pinned {
                        return true;
                    }
                    *value = None;
                }
                reclaimed.push(SoftEntry { slot });
                false
            });
        }

        let count = reclaimed.len();
        if count > 0 {
            self.shared.notifications.lock().extend(reclaimed);
            tracing::debug!(reclaimed = count, "reclaimed unpinned cache values");
        }
        count
    }

    /// Number of registered entries whose value is still present.
    pub fn live_len(&self) -> usize {
        self.shared
            .registry
            .lock()
            .slots
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|slot| slot.value.lock().is_some())
            .count()
    }

    /// Number of notifications not yet drained by the decorator.
    pub fn pending(&self) -> usize {
        self.shared.notifications.lock().len()
    }
}

impl<K, V> Clone for Reclaimer<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V> fmt::Debug for Reclaimer<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reclaimer")
            .field("pending", &self.pending())
            .finish()
    }
}
