//! The in-memory catalog and the audited comment-update transaction.

use crate::comment::Comment;
use crate::history::{HistoryStore, MemoryHistoryStore};
use crate::page::Page;
use async_trait::async_trait;
use chrono::Utc;
use folio_acl::PageResolver;
use folio_audit::{AuditEngine, Capture, HistoryRecord, MAX_EDIT_RETRIES};
use folio_core::{ActorId, CommentId, EntityKind, Error, PageId, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-memory resource catalog.
///
/// Owns pages and comments; history records live behind the injected
/// [`HistoryStore`]. All mutations are safe under concurrent invocation:
/// comment edits are serialized per comment by an optimistic
/// version check, retried up to
/// [`MAX_EDIT_RETRIES`] before surfacing
/// [`Error::Conflict`].
pub struct MemoryCatalog {
    pages: RwLock<HashMap<PageId, Page>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
    histories: Arc<dyn HistoryStore>,
    audit: AuditEngine,
    next_ordinal: AtomicU64,
}

impl MemoryCatalog {
    /// Creates a catalog backed by a [`MemoryHistoryStore`].
    pub fn new() -> Self {
        Self::with_history_store(Arc::new(MemoryHistoryStore::new()))
    }

    /// Creates a catalog over a caller-supplied history store.
    pub fn with_history_store(histories: Arc<dyn HistoryStore>) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            comments: RwLock::new(HashMap::new()),
            histories,
            audit: AuditEngine::new(),
            next_ordinal: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Creates a page. Fails with a validation error if the name is
    /// empty or already taken.
    pub async fn create_page(&self, id: PageId) -> Result<Page> {
        if id.is_empty() {
            return Err(Error::validation("page name must not be empty"));
        }
        let mut pages = self.pages.write().await;
        if pages.contains_key(&id) {
            return Err(Error::validation(format!("page '{id}' already exists")));
        }
        let page = Page::new(id.clone());
        log::info!("created page '{id}'");
        pages.insert(id, page.clone());
        Ok(page)
    }

    /// Renames a page, rewriting the page reference on every comment
    /// scoped to it.
    ///
    /// Grants are keyed by page name too; the service layer calls
    /// [`GrantStore::rename_page`](folio_acl::GrantStore::rename_page)
    /// alongside this.
    pub async fn rename_page(&self, from: &PageId, to: &PageId) -> Result<Page> {
        if to.is_empty() {
            return Err(Error::validation("page name must not be empty"));
        }
        let mut pages = self.pages.write().await;
        if pages.contains_key(to) {
            return Err(Error::validation(format!("page '{to}' already exists")));
        }
        let mut page = pages
            .remove(from)
            .ok_or_else(|| Error::not_found(EntityKind::Page, from))?;
        page.id = to.clone();
        pages.insert(to.clone(), page.clone());

        let mut comments = self.comments.write().await;
        for comment in comments.values_mut().filter(|c| &c.page == from) {
            comment.page = to.clone();
        }
        log::info!("renamed page '{from}' to '{to}'");
        Ok(page)
    }

    /// Deletes a page and cascades: every comment on it, and every
    /// comment's history trail. Returns how many comments were removed.
    pub async fn delete_page(&self, id: &PageId) -> Result<usize> {
        let mut pages = self.pages.write().await;
        pages
            .remove(id)
            .ok_or_else(|| Error::not_found(EntityKind::Page, id))?;

        let mut comments = self.comments.write().await;
        let doomed: Vec<CommentId> = comments
            .values()
            .filter(|c| &c.page == id)
            .map(|c| c.id)
            .collect();
        for comment_id in &doomed {
            comments.remove(comment_id);
            self.histories.remove_comment(comment_id).await?;
        }
        log::info!("deleted page '{id}' and {} comment(s)", doomed.len());
        Ok(doomed.len())
    }

    /// All pages, sorted by name.
    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        let mut pages: Vec<Page> = self.pages.read().await.values().cloned().collect();
        pages.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pages)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Attaches a new comment to a page.
    ///
    /// A first save has no prior state, so no history record is created.
    pub async fn create_comment(
        &self,
        page: &PageId,
        author: &ActorId,
        body: String,
    ) -> Result<Comment> {
        if !self.pages.read().await.contains_key(page) {
            return Err(Error::not_found(EntityKind::Page, page));
        }
        let ordinal = self.next_ordinal.fetch_add(1, Ordering::Relaxed);
        let comment = Comment::new(page.clone(), author.clone(), body, ordinal);
        log::debug!("created comment {comment}");
        self.comments.write().await.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Looks up one comment.
    pub async fn comment(&self, id: &CommentId) -> Result<Comment> {
        self.comments
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::Comment, id))
    }

    /// All comments on a page, newest first.
    pub async fn comments_for_page(&self, page: &PageId) -> Result<Vec<Comment>> {
        if !self.pages.read().await.contains_key(page) {
            return Err(Error::not_found(EntityKind::Page, page));
        }
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|c| &c.page == page)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.ordinal.cmp(&a.ordinal))
        });
        Ok(comments)
    }

    /// Deletes a comment and cascades its history trail.
    pub async fn delete_comment(&self, id: &CommentId) -> Result<()> {
        let mut comments = self.comments.write().await;
        comments
            .remove(id)
            .ok_or_else(|| Error::not_found(EntityKind::Comment, id))?;
        self.histories.remove_comment(id).await?;
        log::debug!("deleted comment {id} and its history");
        Ok(())
    }

    /// The edit trail for one comment, newest first.
    pub async fn history(&self, id: &CommentId) -> Result<Vec<HistoryRecord>> {
        if !self.comments.read().await.contains_key(id) {
            return Err(Error::not_found(EntityKind::Comment, id));
        }
        self.histories.for_comment(id).await
    }

    /// The audited edit: commits a new body together with the history
    /// record that snapshots the old one, as one atomic unit.
    ///
    /// The read-compare-write sequence per attempt:
    ///
    /// 1. snapshot the persisted body and version,
    /// 2. compute the capture decision from that snapshot,
    /// 3. take the write lock and re-check the version; if another edit
    ///    committed in between, retry from 1,
    /// 4. append the record, then commit body, `updated_at`, and the
    ///    version bump.
    ///
    /// A failed history append aborts the edit with the body untouched.
    /// A no-op edit (identical body) returns `Ok(None)`: no record, no
    /// version bump, `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the comment does not exist;
    /// [`Error::Conflict`] once concurrent edits have won the race
    /// [`MAX_EDIT_RETRIES`] times in a row.
    pub async fn update_comment_body(
        &self,
        id: &CommentId,
        new_body: &str,
        editor: &ActorId,
    ) -> Result<Option<HistoryRecord>> {
        for attempt in 1..=MAX_EDIT_RETRIES {
            let (observed_body, observed_version) = {
                let comments = self.comments.read().await;
                let comment = comments
                    .get(id)
                    .ok_or_else(|| Error::not_found(EntityKind::Comment, id))?;
                (comment.body.clone(), comment.version)
            };
            let sequence = self.histories.count_for(id).await?;
            let capture =
                self.audit
                    .capture_if_changed(*id, &observed_body, new_body, editor, sequence);

            let mut comments = self.comments.write().await;
            let comment = comments
                .get_mut(id)
                .ok_or_else(|| Error::not_found(EntityKind::Comment, id))?;
            if comment.version != observed_version {
                // Another edit committed between our snapshot and now;
                // the capture above is stale.
                log::debug!("comment {id}: lost edit race (attempt {attempt}), retrying");
                continue;
            }
            match capture {
                Capture::Unchanged => return Ok(None),
                Capture::Record(record) => {
                    // History first: if this fails, nothing committed.
                    self.histories.append(record.clone()).await?;
                    comment.body = new_body.to_string();
                    comment.updated_at = Utc::now();
                    comment.version += 1;
                    log::debug!(
                        "comment {id}: body updated by {editor} (version {})",
                        comment.version
                    );
                    return Ok(Some(record));
                }
            }
        }
        Err(Error::Conflict {
            id: id.to_string(),
            attempts: MAX_EDIT_RETRIES,
        })
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCatalog").finish_non_exhaustive()
    }
}

#[async_trait]
impl PageResolver for MemoryCatalog {
    async fn page_exists(&self, page: &PageId) -> Result<bool> {
        Ok(self.pages.read().await.contains_key(page))
    }
}
