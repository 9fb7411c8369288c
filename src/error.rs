//! Error types for the softcache library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. a zero store bound or an empty cache id).
//!
//! Store failures are not wrapped here: every decorator reports its delegate's
//! own `Error` type unchanged.
//!
//! ## Example Usage
//!
//! ```
//! use softcache::builder::CacheBuilder;
//! use softcache::error::ConfigError;
//!
//! let bad = CacheBuilder::new("users").store_capacity(0).try_build::<u64, String>();
//! let err: ConfigError = bad.unwrap_err();
//! assert!(err.message().contains("capacity"));
//! ```

use thiserror::Error;

/// Error returned when internal cache invariants are violated.
///
/// Produced by debug-only `check_invariants` methods on cache types
/// (e.g. [`HotSet::check_invariants`](crate::ds::HotSet::check_invariants)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvariantError {
    message: String,
}

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use softcache::builder::CacheBuilder;
///
/// let err = CacheBuilder::new("").try_build::<u64, u64>().unwrap_err();
/// assert!(err.to_string().contains("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
