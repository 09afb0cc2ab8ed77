//! The capture decision: snapshot the previous body iff it changed.

use crate::record::HistoryRecord;
use chrono::Utc;
use folio_core::{ActorId, CommentId, HistoryId};

/// How many times the read-compare-write edit sequence is retried when a
/// concurrent edit wins the race, before surfacing
/// [`Error::Conflict`](folio_core::Error::Conflict).
pub const MAX_EDIT_RETRIES: u32 = 3;

/// Outcome of a capture decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// The body changed; this record must be committed atomically with
    /// the new body.
    Record(HistoryRecord),
    /// The new body equals the persisted body: a no-op edit, no record.
    Unchanged,
}

impl Capture {
    /// Returns the record, if the body changed.
    pub fn record(self) -> Option<HistoryRecord> {
        match self {
            Capture::Record(record) => Some(record),
            Capture::Unchanged => None,
        }
    }

    /// Returns `true` if the body changed.
    pub fn is_change(&self) -> bool {
        matches!(self, Capture::Record(_))
    }
}

/// Builds history records for content mutations.
///
/// Pure and stateless: given the *persisted* pre-mutation body and the
/// incoming body, it decides whether a record is due. The caller owns the
/// transaction — it must:
///
/// 1. read `previous_body` from durable storage (never an in-memory
///    draft) under per-comment exclusivity,
/// 2. call [`capture_if_changed`](Self::capture_if_changed),
/// 3. commit the returned record and the new body as one atomic unit, or
///    abort both.
///
/// First saves never route through capture: a comment that did not
/// previously exist has no prior state to snapshot.
///
/// Privileged actors get no special treatment here. The privilege bypass
/// belongs to authorization; whoever performs a mutation is attributed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditEngine;

impl AuditEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Decides whether the edit warrants a history record.
    ///
    /// `sequence` is the next position in the comment's edit trail; the
    /// caller derives it from the records already committed while holding
    /// the same exclusivity that protects the body.
    pub fn capture_if_changed(
        &self,
        comment: CommentId,
        previous_body: &str,
        new_body: &str,
        editor: &ActorId,
        sequence: u64,
    ) -> Capture {
        if previous_body == new_body {
            log::debug!("no-op edit on comment {comment} by {editor}, no history");
            return Capture::Unchanged;
        }
        Capture::Record(HistoryRecord {
            id: HistoryId::new(),
            comment,
            previous_body: previous_body.to_string(),
            modified_by: editor.clone(),
            modified_at: Utc::now(),
            sequence,
        })
    }
}
