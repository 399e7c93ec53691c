//! Error types for the sampled-lru library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated. Produced by the test-facing `check_invariants` method on
//!   [`SampledLruCore`](crate::policy::sampled_lru::SampledLruCore); release
//!   code paths treat a broken invariant as unrecoverable and panic instead.
//!
//! Lookup misses are not errors: `get`/`peek`/`remove` signal absence through
//! their `Option`/`bool` return channels. Construction is infallible: the
//! capacity is a `usize`, and zero is a legal degenerate configuration.

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by
/// [`SampledLruCore::check_invariants`](crate::policy::sampled_lru::SampledLruCore::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message() {
        let err = InvariantError::new("index map size mismatch");
        assert_eq!(err.to_string(), "index map size mismatch");
    }

    #[test]
    fn debug_includes_message() {
        let err = InvariantError::new("stale slot index");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("stale slot index"));
    }

    #[test]
    fn message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
