//! Error types shared across the Folio workspace.
//!
//! The taxonomy is deliberately small and fail-closed:
//!
//! - [`Error::NotFound`] — a referenced entity does not exist. This is a
//!   request rejection, distinct from an authorization denial (denials are
//!   values, not errors; see `folio-acl`).
//! - [`Error::Unavailable`] — the backing store could not be consulted.
//!   Callers must treat this as "cannot decide" and propagate it; it must
//!   never be collapsed into an allow or a deny.
//! - [`Error::Conflict`] — a concurrent mutation was detected and the
//!   bounded retry budget was exhausted.
//! - [`Error::Validation`] — malformed input.

use crate::ids::EntityKind;

/// Result type alias for Folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Folio core.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A referenced actor, page, or comment does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of entity was looked up.
        kind: EntityKind,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The backing store could not be consulted.
    ///
    /// Must propagate as a hard failure; never resolve to allow or deny.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// What went wrong.
        message: String,
    },

    /// A concurrent mutation won the race, repeatedly.
    #[error("conflicting edit on {id}: gave up after {attempts} attempts")]
    Conflict {
        /// The contended entity.
        id: String,
        /// How many times the read-compare-write sequence was attempted.
        attempts: u32,
    },

    /// Malformed input.
    #[error("validation error: {message}")]
    Validation {
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Creates a `NotFound` error for an entity.
    pub fn not_found<S: ToString>(kind: EntityKind, id: S) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates an `Unavailable` error.
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Error::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a `Validation` error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Returns whether this error is worth retrying.
    ///
    /// `Unavailable` and `Conflict` are transient; the rest are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Unavailable { .. } => true,
            Error::Conflict { .. } => true,
            Error::NotFound { .. } => false,
            Error::Validation { .. } => false,
        }
    }
}
