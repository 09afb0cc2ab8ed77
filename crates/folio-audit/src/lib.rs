//! # folio-audit
//!
//! Tamper-evident edit history for Folio content.
//!
//! Every time a comment's body changes, the state *before* the change is
//! snapshotted into an immutable [`HistoryRecord`], attributed to the
//! identity that made the edit. Records are append-only and totally
//! ordered per comment, so the full edit trail of any comment can be
//! replayed.
//!
//! The capture decision itself ([`AuditEngine::capture_if_changed`]) is a
//! pure function; the surrounding read-compare-write transaction lives in
//! the catalog, which calls it with the persisted pre-mutation body while
//! holding per-comment exclusivity. This is a deliberate departure from
//! implicit before-save hooks: an explicit call inside the update
//! transaction is the only way to guarantee that a record and its commit
//! land as one atomic unit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod record;

pub use engine::{AuditEngine, Capture, MAX_EDIT_RETRIES};
pub use record::HistoryRecord;
