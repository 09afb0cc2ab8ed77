//! # folio-core
//!
//! Core types for the Folio authorization fabric:
//! - Newtype identifiers for actors, pages, comments, and history records
//! - The shared error taxonomy (`NotFound`, `Unavailable`, `Conflict`, ...)
//! - The [`Identity`] context trait and the in-memory [`ActorDirectory`]
//!
//! Identity is always passed explicitly: no Folio component reads the
//! acting identity from ambient or thread-local state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod ids;

pub use error::{Error, Result};
pub use identity::{ActorDirectory, Identity};
pub use ids::{ActorId, CommentId, EntityKind, HistoryId, PageId};
