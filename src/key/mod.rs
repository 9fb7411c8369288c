//! Composite cache keys.
//!
//! - [`KeyValue`]: the heterogeneous value model appended to keys.
//! - [`CompositeKey`]: rolling hash, checksum and ordered value list.

pub mod composite;
pub mod value;

pub use composite::{CompositeKey, DEFAULT_HASH, DEFAULT_MULTIPLIER};
pub use value::KeyValue;
