//! History storage: trait definition and the in-memory implementation.

use async_trait::async_trait;
use folio_audit::HistoryRecord;
use folio_core::{CommentId, Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Append-only storage for history records, keyed by comment.
///
/// Implementations never update or reorder records. The catalog appends
/// inside the comment-update transaction; a failed append aborts the
/// whole edit, which is what makes the trail trustworthy.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends a record to its comment's trail.
    ///
    /// The record's `sequence` must be exactly the current trail length;
    /// anything else means the caller's exclusivity was violated and the
    /// append is rejected rather than recorded out of order.
    async fn append(&self, record: HistoryRecord) -> Result<()>;

    /// The trail for one comment, newest first.
    async fn for_comment(&self, comment: &CommentId) -> Result<Vec<HistoryRecord>>;

    /// Number of records in one comment's trail.
    async fn count_for(&self, comment: &CommentId) -> Result<u64>;

    /// Drops the trail for one comment. Cascade hook for comment
    /// deletion; returns how many records were dropped.
    async fn remove_comment(&self, comment: &CommentId) -> Result<usize>;
}

/// In-memory [`HistoryStore`].
///
/// Trails are stored in application order; `for_comment` reverses on the
/// way out.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    trails: RwLock<HashMap<CommentId, Vec<HistoryRecord>>>,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<()> {
        let mut trails = self.trails.write().await;
        let trail = trails.entry(record.comment).or_default();
        if record.sequence != trail.len() as u64 {
            return Err(Error::Conflict {
                id: record.comment.to_string(),
                attempts: 1,
            });
        }
        log::debug!("appending {record}");
        trail.push(record);
        Ok(())
    }

    async fn for_comment(&self, comment: &CommentId) -> Result<Vec<HistoryRecord>> {
        Ok(self
            .trails
            .read()
            .await
            .get(comment)
            .map(|trail| trail.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn count_for(&self, comment: &CommentId) -> Result<u64> {
        Ok(self
            .trails
            .read()
            .await
            .get(comment)
            .map(|trail| trail.len() as u64)
            .unwrap_or(0))
    }

    async fn remove_comment(&self, comment: &CommentId) -> Result<usize> {
        Ok(self
            .trails
            .write()
            .await
            .remove(comment)
            .map(|trail| trail.len())
            .unwrap_or(0))
    }
}
