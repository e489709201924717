// src/error.rs
// ============================================================================
// Module: Error Types
// Description: The single error kind raised at the crate's API boundary.
// Purpose: Report precondition violations without retaining internal state.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every fallible entry point in this crate returns [`GrantResult`]. There is
//! exactly one error kind, matching the underlying language's single
//! `PreconditionViolation` exception: callers either corrected their input or
//! the call was invalid, and there is nothing to recover from in between.

// ============================================================================
// SECTION: Precondition Violation
// ============================================================================

use thiserror::Error;

/// Raised when an input to this crate's API violates a documented
/// constraint: an empty group, a malformed criterion, a rule with no
/// granted privileges, and so on.
///
/// This is the only error type the crate exposes. Internal evaluation
/// functions are infallible for any well-formed, already-validated input;
/// validation happens once, at construction or at the [`crate::satisfies`]
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PreconditionViolation {
    message: String,
}

impl PreconditionViolation {
    /// Builds a new violation carrying a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the violation's human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result alias used throughout the crate's public API.
pub type GrantResult<T> = Result<T, PreconditionViolation>;

/// Raises a [`PreconditionViolation`] with `message` unless `condition` holds.
pub(crate) fn precondition(condition: bool, message: impl Into<String>) -> GrantResult<()> {
    if condition {
        Ok(())
    } else {
        Err(PreconditionViolation::new(message))
    }
}
