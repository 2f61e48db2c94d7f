//! Error types for the freqtrack library.
//!
//! Normal use of a [`FrequencyTracker`](crate::tracker::FrequencyTracker) has
//! no failure modes: decrementing an untracked key is a no-op and querying an
//! empty tracker yields `None`. The only error is [`InvariantError`], produced
//! by the `check_invariants` audits when the internal structure is corrupt.
//! That always indicates a defect, never a caller mistake.
//!
//! ## Example Usage
//!
//! ```
//! use freqtrack::error::InvariantError;
//! use freqtrack::tracker::FrequencyTracker;
//!
//! let mut tracker = FrequencyTracker::new();
//! tracker.increment("a");
//! let audit: Result<(), InvariantError> = tracker.check_invariants();
//! assert!(audit.is_ok());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal tracker invariants are violated.
///
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
