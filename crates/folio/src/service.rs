//! The composition root: gated content flow over the catalog.
//!
//! Every entry point takes the acting identity explicitly, runs the
//! authorization decision before any effect, and routes body edits
//! through the catalog's audited update. Denials are expected outcomes:
//! they come back as [`ServiceError::Denied`], are logged at debug, and
//! carry the reason so callers can decide how much of it to surface.

use folio_acl::{AclEngine, CapabilitySet, Decision, DenyReason, Grant, GrantStore,
                MemoryGrantStore, Operation, PageResolver};
use folio_audit::HistoryRecord;
use folio_catalog::{Comment, MemoryCatalog, Page};
use folio_core::{ActorDirectory, ActorId, CommentId, EntityKind, Error, Identity, PageId};
use std::sync::Arc;

/// Result type alias for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors surfaced by [`FolioService`].
///
/// `Denied` and `PrivilegeRequired` are normal request rejections, not
/// failures; `Core` carries the shared taxonomy (`NotFound`,
/// `Unavailable`, `Conflict`, `Validation`).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// The authorization engine denied the operation.
    #[error("access denied: {0}")]
    Denied(DenyReason),

    /// The operation is reserved for privileged actors.
    #[error("operation requires a privileged actor")]
    PrivilegeRequired,

    /// An underlying catalog, grant, or identity error.
    #[error(transparent)]
    Core(#[from] Error),
}

impl ServiceError {
    /// Returns `true` for expected rejections (denied or insufficient
    /// privilege), as opposed to infrastructure failures.
    pub fn is_rejection(&self) -> bool {
        match self {
            ServiceError::Denied(_) | ServiceError::PrivilegeRequired => true,
            ServiceError::Core(err) => matches!(err, Error::NotFound { .. }),
        }
    }
}

/// The wired-together Folio fabric.
///
/// Holds the in-memory identity directory, catalog, and grant store, and
/// the [`AclEngine`] spanning them. Cheap to share behind an `Arc`; all
/// entry points take `&self` and are safe under concurrent invocation.
pub struct FolioService {
    directory: Arc<ActorDirectory>,
    catalog: Arc<MemoryCatalog>,
    grants: Arc<MemoryGrantStore>,
    engine: AclEngine,
}

impl FolioService {
    /// Creates an empty fabric.
    pub fn new() -> Self {
        let directory = Arc::new(ActorDirectory::new());
        let catalog = Arc::new(MemoryCatalog::new());
        let grants = Arc::new(MemoryGrantStore::new());
        let engine = AclEngine::new(
            directory.clone() as Arc<dyn Identity>,
            catalog.clone() as Arc<dyn PageResolver>,
            grants.clone() as Arc<dyn GrantStore>,
        );
        Self {
            directory,
            catalog,
            grants,
            engine,
        }
    }

    /// The authorization engine, for callers that need raw decisions.
    pub fn engine(&self) -> &AclEngine {
        &self.engine
    }

    // ------------------------------------------------------------------
    // Actors
    // ------------------------------------------------------------------

    /// Registers an actor with the embedded directory.
    ///
    /// Identity issuance is outside Folio's scope; this exists so an
    /// embedding application (or a test) can provision the in-memory
    /// directory. Deployments with a real identity provider implement
    /// [`Identity`] instead and wire their own engine.
    pub fn register_actor<A: Into<ActorId>>(&self, actor: A, privileged: bool) -> ServiceResult<()> {
        self.directory.register(actor, privileged)?;
        Ok(())
    }

    /// Removes an actor and cascades away every grant they held.
    pub async fn remove_actor(&self, actor: &ActorId) -> ServiceResult<()> {
        if !self.directory.remove(actor)? {
            return Err(Error::not_found(EntityKind::Actor, actor).into());
        }
        self.grants.remove_actor(actor).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pages (privileged setup)
    // ------------------------------------------------------------------

    /// Creates a page. Privileged actors only.
    pub async fn create_page(&self, acting: &ActorId, name: PageId) -> ServiceResult<Page> {
        self.require_privileged(acting).await?;
        Ok(self.catalog.create_page(name).await?)
    }

    /// Renames a page, carrying comments and grants along. Privileged
    /// actors only.
    pub async fn rename_page(
        &self,
        acting: &ActorId,
        from: &PageId,
        to: &PageId,
    ) -> ServiceResult<Page> {
        self.require_privileged(acting).await?;
        let page = self.catalog.rename_page(from, to).await?;
        self.grants.rename_page(from, to).await?;
        Ok(page)
    }

    /// Deletes a page and cascades: comments, their histories, and every
    /// grant scoped to the page. Privileged actors only.
    pub async fn delete_page(&self, acting: &ActorId, page: &PageId) -> ServiceResult<()> {
        self.require_privileged(acting).await?;
        self.catalog.delete_page(page).await?;
        self.grants.remove_page(page).await?;
        Ok(())
    }

    /// All pages, sorted by name. Any known actor.
    pub async fn list_pages(&self, acting: &ActorId) -> ServiceResult<Vec<Page>> {
        self.require_known(acting).await?;
        Ok(self.catalog.list_pages().await?)
    }

    // ------------------------------------------------------------------
    // Grants (privileged setup)
    // ------------------------------------------------------------------

    /// Creates or replaces the grant for (actor, page). Privileged
    /// actors only.
    ///
    /// Fails with `NotFound` if the target actor or the page does not
    /// exist; a grant on a nonexistent entity would be unreachable dead
    /// state.
    pub async fn grant(
        &self,
        acting: &ActorId,
        actor: &ActorId,
        page: &PageId,
        capabilities: CapabilitySet,
    ) -> ServiceResult<Grant> {
        self.require_privileged(acting).await?;
        if !self.directory.actor_exists(actor).await? {
            return Err(Error::not_found(EntityKind::Actor, actor).into());
        }
        if !self.catalog.page_exists(page).await? {
            return Err(Error::not_found(EntityKind::Page, page).into());
        }
        Ok(self.grants.upsert(actor, page, capabilities).await?)
    }

    /// Removes the grant for (actor, page). Privileged actors only.
    /// Returns `true` if a grant existed.
    pub async fn revoke(
        &self,
        acting: &ActorId,
        actor: &ActorId,
        page: &PageId,
    ) -> ServiceResult<bool> {
        self.require_privileged(acting).await?;
        Ok(self.grants.remove(actor, page).await?)
    }

    /// All grants held by one actor. Privileged actors only.
    pub async fn grants_for_actor(
        &self,
        acting: &ActorId,
        actor: &ActorId,
    ) -> ServiceResult<Vec<Grant>> {
        self.require_privileged(acting).await?;
        Ok(self.grants.for_actor(actor).await?)
    }

    /// All grants scoped to one page. Privileged actors only.
    pub async fn grants_for_page(
        &self,
        acting: &ActorId,
        page: &PageId,
    ) -> ServiceResult<Vec<Grant>> {
        self.require_privileged(acting).await?;
        Ok(self.grants.for_page(page).await?)
    }

    // ------------------------------------------------------------------
    // Gated content flow
    // ------------------------------------------------------------------

    /// Lists the comments on a page, newest first. Requires `View`.
    pub async fn view_comments(
        &self,
        actor: &ActorId,
        page: &PageId,
    ) -> ServiceResult<Vec<Comment>> {
        self.ensure_allowed(actor, Some(page), Operation::View).await?;
        Ok(self.catalog.comments_for_page(page).await?)
    }

    /// Attaches a comment to a page. Requires `Create`. First saves
    /// produce no history.
    pub async fn add_comment(
        &self,
        actor: &ActorId,
        page: &PageId,
        body: String,
    ) -> ServiceResult<Comment> {
        self.ensure_allowed(actor, Some(page), Operation::Create).await?;
        Ok(self.catalog.create_comment(page, actor, body).await?)
    }

    /// Edits a comment's body. Requires `Edit` on the comment's page.
    ///
    /// The edit and its history capture commit as one atomic unit in the
    /// catalog; a no-op edit returns `Ok(None)`.
    pub async fn edit_comment(
        &self,
        actor: &ActorId,
        comment: &CommentId,
        new_body: &str,
    ) -> ServiceResult<Option<HistoryRecord>> {
        let page = self.catalog.comment(comment).await?.page;
        self.ensure_allowed(actor, Some(&page), Operation::Edit).await?;
        Ok(self
            .catalog
            .update_comment_body(comment, new_body, actor)
            .await?)
    }

    /// Deletes a comment (and its history). Requires `Delete` on the
    /// comment's page.
    pub async fn remove_comment(&self, actor: &ActorId, comment: &CommentId) -> ServiceResult<()> {
        let page = self.catalog.comment(comment).await?.page;
        self.ensure_allowed(actor, Some(&page), Operation::Delete).await?;
        Ok(self.catalog.delete_comment(comment).await?)
    }

    /// The edit trail for one comment, newest first. Privileged actors
    /// only.
    pub async fn history(
        &self,
        acting: &ActorId,
        comment: &CommentId,
    ) -> ServiceResult<Vec<HistoryRecord>> {
        self.require_privileged(acting).await?;
        Ok(self.catalog.history(comment).await?)
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    async fn ensure_allowed(
        &self,
        actor: &ActorId,
        page: Option<&PageId>,
        op: Operation,
    ) -> ServiceResult<()> {
        match self.engine.authorize(actor, page, op).await? {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                log::debug!("rejecting {op} by {actor}: {reason}");
                Err(ServiceError::Denied(reason))
            }
        }
    }

    async fn require_privileged(&self, actor: &ActorId) -> ServiceResult<()> {
        if self.directory.is_privileged(actor).await? {
            Ok(())
        } else {
            log::debug!("rejecting privileged operation by {actor}");
            Err(ServiceError::PrivilegeRequired)
        }
    }

    async fn require_known(&self, actor: &ActorId) -> ServiceResult<()> {
        if self.directory.actor_exists(actor).await? {
            Ok(())
        } else {
            Err(Error::not_found(EntityKind::Actor, actor).into())
        }
    }
}

impl Default for FolioService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FolioService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolioService").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        assert!(ServiceError::Denied(DenyReason::NoGrant).is_rejection());
        assert!(ServiceError::PrivilegeRequired.is_rejection());
        assert!(
            ServiceError::Core(Error::not_found(EntityKind::Page, "docs")).is_rejection()
        );
        assert!(!ServiceError::Core(Error::unavailable("down")).is_rejection());
    }

    #[test]
    fn test_denied_display_carries_reason() {
        let err = ServiceError::Denied(DenyReason::NotPermitted(Operation::Edit));
        assert_eq!(err.to_string(), "access denied: grant does not permit edit");
    }

    #[tokio::test]
    async fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FolioService>();
    }
}
