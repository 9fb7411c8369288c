//! Bounded pin list for recently read values.
//!
//! Used by [`ReclaimAwareCache`](crate::decorator::ReclaimAwareCache) to keep
//! strong handles to the values it served most recently, so that a reclaimer
//! sees them as still in use. Implemented as a `VecDeque` with the newest pin
//! at the front.
//!
//! ## Architecture
//!
//! ```text
//!   front ─► [v9] ─ [v7] ─ [v9] ─ [v3] ◄─ back
//!            newest                oldest (dropped first)
//! ```
//!
//! ## Behavior
//! - `pin(v)`: pushes `v` to the front; if the list is now longer than its
//!   capacity, the single oldest pin is dropped.
//! - Duplicates are allowed: a value read twice holds two pins.
//! - `set_capacity(n)`: takes effect lazily; the list shrinks by at most one
//!   pin per subsequent `pin`.
//! - `clear()`: drops every pin.
//!
//! Dropping a pin never removes anything from a store; it only makes the
//! value eligible for reclamation again.
use std::collections::VecDeque;

use crate::error::InvariantError;

/// Default number of pins kept by a hot set.
pub const DEFAULT_HOT_SET_CAPACITY: usize = 256;

#[derive(Debug)]
/// Bounded, newest-first list of strong value handles.
pub struct HotSet<V> {
    pins: VecDeque<V>,
    capacity: usize,
}

impl<V> HotSet<V> {
    /// Creates a hot set holding at most `capacity` pins.
    pub fn new(capacity: usize) -> Self {
        Self {
            pins: VecDeque::with_capacity(capacity.min(DEFAULT_HOT_SET_CAPACITY)),
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reconfigures the bound without evicting anything now.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Returns the number of pins currently held.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if no pins are held.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Pins `value` as most recent; returns the pin dropped from the back, if any.
    pub fn pin(&mut self, value: V) -> Option<V> {
        self.pins.push_front(value);
        if self.pins.len() > self.capacity {
            self.pins.pop_back()
        } else {
            None
        }
    }

    /// Iterates pins from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.pins.iter()
    }

    /// Drops every pin.
    pub fn clear(&mut self) {
        self.pins.clear();
    }

    /// Checks that the list is within its bound.
    ///
    /// Only meaningful when the capacity has not been lowered since the last
    /// pins were added.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.pins.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "hot set holds {} pins but capacity is {}",
                self.pins.len(),
                self.capacity
            )));
        }
        Ok(())
    }
}

impl<V> Default for HotSet<V> {
    fn default() -> Self {
        Self::new(DEFAULT_HOT_SET_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_set_pins_newest_first_and_drops_oldest() {
        let mut hot = HotSet::new(2);
        assert_eq!(hot.pin("a"), None);
        assert_eq!(hot.pin("b"), None);
        assert_eq!(hot.pin("c"), Some("a"));
        assert_eq!(hot.iter().copied().collect::<Vec<_>>(), vec!["c", "b"]);
        assert!(hot.check_invariants().is_ok());
    }

    #[test]
    fn hot_set_zero_capacity_drops_immediately() {
        let mut hot = HotSet::new(0);
        assert_eq!(hot.pin("a"), Some("a"));
        assert!(hot.is_empty());
    }

    #[test]
    fn hot_set_keeps_duplicates() {
        let mut hot = HotSet::new(3);
        hot.pin("a");
        hot.pin("a");
        assert_eq!(hot.len(), 2);
    }

    #[test]
    fn hot_set_shrinks_lazily_after_capacity_change() {
        let mut hot = HotSet::new(4);
        for v in ["a", "b", "c", "d"] {
            hot.pin(v);
        }
        hot.set_capacity(1);
        assert_eq!(hot.len(), 4);
        assert!(hot.check_invariants().is_err());

        assert_eq!(hot.pin("e"), Some("a"));
        assert_eq!(hot.len(), 4);
    }

    #[test]
    fn hot_set_clear_resets_state() {
        let mut hot = HotSet::default();
        assert_eq!(hot.capacity(), DEFAULT_HOT_SET_CAPACITY);
        hot.pin(1);
        hot.pin(2);
        hot.clear();
        assert!(hot.is_empty());
    }
}
