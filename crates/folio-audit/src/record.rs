//! The immutable history record.

use chrono::{DateTime, Utc};
use folio_core::{ActorId, CommentId, HistoryId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable snapshot of a comment body prior to one mutation.
///
/// Records are never updated or reordered after creation. Per comment,
/// `sequence` is strictly monotonic and equals the order in which the
/// mutations were applied; `modified_at` carries the wall-clock time but
/// ordering never relies on it (two edits can land in the same clock
/// tick).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique record ID.
    pub id: HistoryId,
    /// The comment this record documents.
    pub comment: CommentId,
    /// The body text as it was before the mutation.
    pub previous_body: String,
    /// Who performed the mutation.
    pub modified_by: ActorId,
    /// When the record was captured.
    pub modified_at: DateTime<Utc>,
    /// Position in the comment's edit trail, starting at 0.
    pub sequence: u64,
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "history #{} for comment {} by {} at {}",
            self.sequence, self.comment, self.modified_by, self.modified_at
        )
    }
}
