//! The comment entity: a mutable unit of content scoped to a page.

use chrono::{DateTime, Utc};
use folio_core::{ActorId, CommentId, PageId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A comment attached to a page.
///
/// The author and `created_at` are fixed at creation; the body is the
/// only user-mutable attribute, and every body change bumps `updated_at`
/// and `version` and leaves a history record behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID.
    pub id: CommentId,
    /// The page this comment is scoped to.
    pub page: PageId,
    /// Who authored the comment. Never changes, even when someone else
    /// edits the body (the editor is recorded in the history trail).
    pub author: ActorId,
    /// The current body text.
    pub body: String,
    /// When the comment was first saved.
    pub created_at: DateTime<Utc>,
    /// When the body was last changed. Equals `created_at` until the
    /// first edit.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency token; bumped on every committed body
    /// change. Two edits racing on the same comment are serialized by
    /// comparing this before commit.
    pub version: u64,
    /// Creation order within the catalog. Tie-breaker for newest-first
    /// listings when two comments share a timestamp.
    pub ordinal: u64,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    pub fn new(page: PageId, author: ActorId, body: String, ordinal: u64) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            page,
            author,
            body,
            created_at: now,
            updated_at: now,
            version: 0,
            ordinal,
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.page, self.author, self.id)
    }
}
