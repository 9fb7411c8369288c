//! Order-sensitive composite cache keys.
//!
//! ## Architecture
//!
//! A [`CompositeKey`] folds every appended value into three running
//! signatures and also keeps the values themselves:
//!
//! ```text
//!   update(v):
//!     base      = v.is_null() ? 1 : v.hash_code()
//!     count    += 1
//!     checksum += base                  (order independent)
//!     hash      = 37 * hash + base * count   (position scaled)
//!     values.push(v)
//! ```
//!
//! `hash` is maintained incrementally so [`Hash`] is O(1). Hash equality is
//! only a filter: [`PartialEq`] re-checks `checksum`, `count` and then every
//! value, so 32-bit collisions never produce a false cache hit.
//!
//! ## Freezing
//!
//! A key must not change once it has been used for a lookup. Moving a key
//! into a map hands ownership to the map, so the borrow checker already rules
//! out mutation there; callers that want to keep extending a key after a
//! lookup should work on a [`Clone`], whose value list is independent.
//!
//! ## Example Usage
//!
//! ```
//! use softcache::key::{CompositeKey, KeyValue};
//!
//! let mut k1 = CompositeKey::new();
//! k1.update("select").update(5).update(KeyValue::Null);
//!
//! let k2 = CompositeKey::from_values(["select".into(), 5.into(), KeyValue::Null]);
//! assert_eq!(k1, k2);
//! assert_eq!(k1.hash_code(), k2.hash_code());
//!
//! let k3 = CompositeKey::from_values([5.into(), "select".into(), KeyValue::Null]);
//! assert_ne!(k1, k3);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::key::value::KeyValue;

/// Multiplier of the rolling hash recurrence.
pub const DEFAULT_MULTIPLIER: i32 = 37;
/// Seed of the rolling hash.
pub const DEFAULT_HASH: i32 = 17;
/// Base hash contributed by a top-level null value.
const NULL_HASH: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    Regular,
    Null,
}

/// Identity key derived from an ordered sequence of [`KeyValue`]s.
#[derive(Debug, Clone)]
pub struct CompositeKey {
    multiplier: i32,
    hash: i32,
    checksum: i64,
    count: i32,
    values: Vec<KeyValue>,
    kind: KeyKind,
}

impl CompositeKey {
    /// Creates an empty key.
    pub fn new() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            hash: DEFAULT_HASH,
            checksum: 0,
            count: 0,
            values: Vec::new(),
            kind: KeyKind::Regular,
        }
    }

    /// Returns the shared "no key" marker.
    ///
    /// It is never equal to a regular key, including one built from zero
    /// values, and it ignores updates.
    pub const fn null() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            hash: DEFAULT_HASH,
            checksum: 0,
            count: 0,
            values: Vec::new(),
            kind: KeyKind::Null,
        }
    }

    /// Creates a key from an ordered sequence of values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        let mut key = Self::new();
        key.update_all(values);
        key
    }

    /// Returns `true` for the null key.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.kind == KeyKind::Null
    }

    /// Appends a value, updating hash, checksum and count.
    pub fn update(&mut self, value: impl Into<KeyValue>) -> &mut Self {
        if self.is_null() {
            tracing::warn!("ignoring update of the null composite key");
            return self;
        }
        let value = value.into();
        let mut base = if value.is_null() {
            NULL_HASH
        } else {
            value.hash_code()
        };

        self.count = self.count.wrapping_add(1);
        self.checksum = self.checksum.wrapping_add(i64::from(base));
        base = base.wrapping_mul(self.count);
        self.hash = self.multiplier.wrapping_mul(self.hash).wrapping_add(base);

        self.values.push(value);
        self
    }

    /// Appends every value in order; equivalent to repeated [`update`](Self::update).
    pub fn update_all<I, T>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KeyValue>,
    {
        for value in values {
            self.update(value);
        }
        self
    }

    /// Returns the precomputed hash.
    #[inline]
    pub fn hash_code(&self) -> i32 {
        self.hash
    }

    /// Returns the order-independent sum of base hashes.
    #[inline]
    pub fn checksum(&self) -> i64 {
        self.checksum
    }

    /// Returns the number of appended values.
    #[inline]
    pub fn update_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the appended values in order.
    #[inline]
    pub fn values(&self) -> &[KeyValue] {
        &self.values
    }
}

impl Default for CompositeKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.kind != other.kind {
            return false;
        }
        if self.hash != other.hash || self.checksum != other.checksum || self.count != other.count
        {
            return false;
        }
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(this, that)| this == that)
    }
}

impl Eq for CompositeKey {}

impl Hash for CompositeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash);
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hash, self.checksum)?;
        for value in &self.values {
            write!(f, ":{value}")?;
        }
        Ok(())
    }
}

impl<T: Into<KeyValue>> Extend<T> for CompositeKey {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.update_all(iter);
    }
}

impl<T: Into<KeyValue>> FromIterator<T> for CompositeKey {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut key = Self::new();
        key.update_all(iter);
        key
    }
}
