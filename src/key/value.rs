//! Heterogeneous values that can be appended to a [`CompositeKey`].
//!
//! `KeyValue` is a closed value model: scalars, strings, byte strings and
//! nested lists. Each variant carries a stable 32-bit base hash so that the
//! same ordered sequence always produces the same key hash, on every platform
//! and across process restarts.
//!
//! ## Hashing
//!
//! | Variant  | Base hash                                   |
//! |----------|---------------------------------------------|
//! | `Null`   | `0` (the key itself substitutes `1`)        |
//! | `Bool`   | `1231` / `1237`                             |
//! | `Int`    | `(v ^ (v >>> 32)) as i32`                   |
//! | `Float`  | same fold over the canonical bit pattern    |
//! | `Str`    | `31 * h + unit` over UTF-16 units, seed `0` |
//! | `Bytes`  | `31 * h + (b as i8)`, seed `1`              |
//! | `List`   | `31 * h + elem`, seed `1`, recursive        |
//!
//! There is a single integer variant. `i32` and `u32` widen into `Int(i64)`
//! and hash with the 64-bit fold, so `KeyValue::from(-1i32)` hashes to `0`
//! and equals `KeyValue::from(-1i64)`. Integers compare by value, not by the
//! width they were written with.
//!
//! ## Text form
//!
//! Floats render with at least one fractional digit. Magnitudes in
//! `[1e-3, 1e7)` print as plain decimals (`100.0`, `0.25`); everything else
//! uses an `E` exponent (`1.0E20`, `1.5E-5`).
//!
//! ## Equality
//!
//! Equality is deep: lists compare element-wise and recursively, floats
//! compare by canonical bits (every NaN equals every other NaN, `0.0` and
//! `-0.0` differ). This keeps `==` consistent with [`KeyValue::hash_code`].
//!
//! [`CompositeKey`]: crate::key::CompositeKey

use std::fmt;

/// A single value appended to a composite key.
#[derive(Debug, Clone)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<KeyValue>),
}

/// Canonical bit pattern used for float hashing and equality.
#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

#[inline]
fn fold64(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as i32
}

impl KeyValue {
    /// Returns `true` for [`KeyValue::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, KeyValue::Null)
    }

    /// Builds a byte-string value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        KeyValue::Bytes(bytes.into())
    }

    /// Builds a list value from anything convertible into key values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KeyValue>,
    {
        KeyValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Deep, order-sensitive 32-bit hash of this value.
    pub fn hash_code(&self) -> i32 {
        match self {
            KeyValue::Null => 0,
            KeyValue::Bool(true) => 1231,
            KeyValue::Bool(false) => 1237,
            KeyValue::Int(v) => fold64(*v as u64),
            KeyValue::Float(v) => fold64(canonical_bits(*v)),
            KeyValue::Str(s) => s
                .encode_utf16()
                .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32)),
            KeyValue::Bytes(bytes) => bytes.iter().fold(1i32, |h, &b| {
                h.wrapping_mul(31).wrapping_add(b as i8 as i32)
            }),
            KeyValue::List(items) => items.iter().fold(1i32, |h, item| {
                h.wrapping_mul(31).wrapping_add(item.hash_code())
            }),
        }
    }
}

impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyValue::Null, KeyValue::Null) => true,
            (KeyValue::Bool(a), KeyValue::Bool(b)) => a == b,
            (KeyValue::Int(a), KeyValue::Int(b)) => a == b,
            (KeyValue::Float(a), KeyValue::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (KeyValue::Str(a), KeyValue::Str(b)) => a == b,
            (KeyValue::Bytes(a), KeyValue::Bytes(b)) => a == b,
            (KeyValue::List(a), KeyValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for KeyValue {}

impl fmt::Display for KeyValue {
    /// Deep textual form: lists and byte strings render as `[a, b, c]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => f.write_str("null"),
            KeyValue::Bool(v) => write!(f, "{v}"),
            KeyValue::Int(v) => write!(f, "{v}"),
            KeyValue::Float(v) => write_float(f, *v),
            KeyValue::Str(s) => f.write_str(s),
            KeyValue::Bytes(bytes) => {
                f.write_str("[")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", *b as i8)?;
                }
                f.write_str("]")
            },
            KeyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = v.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return write!(f, "{v:?}");
    }
    let scientific = format!("{v:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            write!(f, "{mantissa}E{exponent}")
        },
        Some((mantissa, exponent)) => write!(f, "{mantissa}.0E{exponent}"),
        None => f.write_str(&scientific),
    }
}

impl From<bool> for KeyValue {
    fn from(v: bool) -> Self {
        KeyValue::Bool(v)
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        KeyValue::Int(i64::from(v))
    }
}

impl From<u32> for KeyValue {
    fn from(v: u32) -> Self {
        KeyValue::Int(i64::from(v))
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        KeyValue::Int(v)
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        KeyValue::Float(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        KeyValue::Str(v.to_owned())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        KeyValue::Str(v)
    }
}

impl From<&[u8]> for KeyValue {
    fn from(v: &[u8]) -> Self {
        KeyValue::Bytes(v.to_vec())
    }
}

impl<T: Into<KeyValue>> From<Vec<T>> for KeyValue {
    fn from(items: Vec<T>) -> Self {
        KeyValue::list(items)
    }
}

impl<T: Into<KeyValue>> From<Option<T>> for KeyValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(KeyValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_hash_codes_are_stable() {
        assert_eq!(KeyValue::Null.hash_code(), 0);
        assert_eq!(KeyValue::Bool(true).hash_code(), 1231);
        assert_eq!(KeyValue::Bool(false).hash_code(), 1237);
        assert_eq!(KeyValue::from(5).hash_code(), 5);
        assert_eq!(KeyValue::from(-1i64).hash_code(), 0);
        assert_eq!(KeyValue::from(1i64 << 32).hash_code(), 1);
    }

    #[test]
    fn string_hash_uses_utf16_units() {
        assert_eq!(KeyValue::from("").hash_code(), 0);
        assert_eq!(KeyValue::from("a").hash_code(), 97);
        assert_eq!(KeyValue::from("ab").hash_code(), 97 * 31 + 98);
        // "select" is a well-known reference value for this polynomial.
        assert_eq!(KeyValue::from("select").hash_code(), -906_021_636);
    }

    #[test]
    fn list_hash_is_deep_and_order_sensitive() {
        let ab = KeyValue::list([1, 2]);
        let ba = KeyValue::list([2, 1]);
        assert_eq!(ab.hash_code(), (31 + 1) * 31 + 2);
        assert_ne!(ab.hash_code(), ba.hash_code());

        let nested = KeyValue::List(vec![KeyValue::list([1, 2]), KeyValue::Null]);
        assert_eq!(nested.hash_code(), (31 + ab.hash_code()) * 31);
    }

    #[test]
    fn bytes_hash_treats_bytes_as_signed() {
        let v = KeyValue::bytes(vec![0xFFu8]);
        assert_eq!(v.hash_code(), 31 - 1);
    }

    #[test]
    fn float_equality_uses_canonical_bits() {
        assert_eq!(KeyValue::Float(f64::NAN), KeyValue::Float(-f64::NAN));
        assert_ne!(KeyValue::Float(0.0), KeyValue::Float(-0.0));
        assert_eq!(
            KeyValue::Float(f64::NAN).hash_code(),
            KeyValue::Float(-f64::NAN).hash_code()
        );
    }

    #[test]
    fn equality_is_deep_for_lists() {
        let a = KeyValue::List(vec![KeyValue::list(["x", "y"]), KeyValue::Null]);
        let b = KeyValue::List(vec![KeyValue::list(["x", "y"]), KeyValue::Null]);
        let c = KeyValue::List(vec![KeyValue::list(["y", "x"]), KeyValue::Null]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(KeyValue::from(1), KeyValue::from(1.0));
    }

    #[test]
    fn display_renders_deep_string() {
        let v = KeyValue::List(vec![
            KeyValue::from("a"),
            KeyValue::list([1, 2]),
            KeyValue::Null,
            KeyValue::Float(5.0),
        ]);
        assert_eq!(v.to_string(), "[a, [1, 2], null, 5.0]");
        assert_eq!(KeyValue::bytes(vec![1u8, 0xFF]).to_string(), "[1, -1]");
    }

    #[test]
    fn display_uses_exponent_outside_plain_range() {
        assert_eq!(KeyValue::Float(1e20).to_string(), "1.0E20");
        assert_eq!(KeyValue::Float(1e-5).to_string(), "1.0E-5");
        assert_eq!(KeyValue::Float(-1.5e-5).to_string(), "-1.5E-5");
        assert_eq!(KeyValue::Float(1e7).to_string(), "1.0E7");
        assert_eq!(KeyValue::Float(100.0).to_string(), "100.0");
        assert_eq!(KeyValue::Float(0.001).to_string(), "0.001");
        assert_eq!(KeyValue::Float(-0.0).to_string(), "-0.0");
        assert_eq!(KeyValue::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(KeyValue::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn narrow_integers_widen_into_one_variant() {
        assert_eq!(KeyValue::from(-1i32), KeyValue::Int(-1));
        assert_eq!(KeyValue::from(-1i32).hash_code(), 0);
        assert_eq!(KeyValue::from(5u32), KeyValue::from(5i64));
        assert_eq!(KeyValue::from(u32::MAX).hash_code(), u32::MAX as i32);
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(KeyValue::from(None::<i32>).is_null());
        assert_eq!(KeyValue::from(Some("x")), KeyValue::from("x"));
    }
}
