//! Grant storage: trait definition and the in-memory implementation.

use crate::capability::CapabilitySet;
use crate::grant::Grant;
use async_trait::async_trait;
use folio_core::{ActorId, PageId, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage for grants, keyed by (actor, page).
///
/// The trait is defined here and implemented by whatever backs the
/// deployment; [`MemoryGrantStore`] is the in-process implementation.
/// Grants across different pairs are independent, so implementations need
/// at most per-pair exclusivity for `upsert`; no global lock is required.
///
/// # Errors
///
/// All methods return [`Error::Unavailable`](folio_core::Error::Unavailable)
/// when the backing store cannot be reached. Existence of the actor and
/// page is the caller's concern (the service layer checks both and returns
/// `NotFound` before touching the store).
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Creates or replaces the single grant for (actor, page).
    ///
    /// Idempotent: upserting the same capability set twice leaves exactly
    /// one grant with that set. A second upsert never duplicates.
    async fn upsert(
        &self,
        actor: &ActorId,
        page: &PageId,
        capabilities: CapabilitySet,
    ) -> Result<Grant>;

    /// Looks up the grant for (actor, page). Pure read, no side effects.
    async fn get(&self, actor: &ActorId, page: &PageId) -> Result<Option<Grant>>;

    /// All grants held by one actor. Order is unspecified.
    async fn for_actor(&self, actor: &ActorId) -> Result<Vec<Grant>>;

    /// All grants scoped to one page. Order is unspecified.
    async fn for_page(&self, page: &PageId) -> Result<Vec<Grant>>;

    /// Removes the grant for (actor, page). Returns `true` if one existed.
    async fn remove(&self, actor: &ActorId, page: &PageId) -> Result<bool>;

    /// Removes every grant held by `actor`. Returns how many were removed.
    ///
    /// Cascade hook for actor deletion; no orphaned grant may survive.
    async fn remove_actor(&self, actor: &ActorId) -> Result<usize>;

    /// Removes every grant scoped to `page`. Returns how many were removed.
    ///
    /// Cascade hook for page deletion.
    async fn remove_page(&self, page: &PageId) -> Result<usize>;

    /// Re-scopes every grant on `from` to `to`.
    ///
    /// Page names are page identity, so a rename must carry the grants
    /// along. Returns how many grants were moved.
    async fn rename_page(&self, from: &PageId, to: &PageId) -> Result<usize>;
}

/// In-memory [`GrantStore`].
///
/// A single map keyed by (actor, page) under an async `RwLock`. The map
/// key enforces the at-most-one-grant-per-pair invariant by construction.
#[derive(Debug, Default)]
pub struct MemoryGrantStore {
    grants: RwLock<HashMap<(ActorId, PageId), Grant>>,
}

impl MemoryGrantStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of grants currently held.
    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }

    /// Returns `true` if the store holds no grants.
    pub async fn is_empty(&self) -> bool {
        self.grants.read().await.is_empty()
    }
}

#[async_trait]
impl GrantStore for MemoryGrantStore {
    async fn upsert(
        &self,
        actor: &ActorId,
        page: &PageId,
        capabilities: CapabilitySet,
    ) -> Result<Grant> {
        let grant = Grant::new(actor.clone(), page.clone(), capabilities);
        log::debug!("upserting grant {grant}");
        self.grants
            .write()
            .await
            .insert((actor.clone(), page.clone()), grant.clone());
        Ok(grant)
    }

    async fn get(&self, actor: &ActorId, page: &PageId) -> Result<Option<Grant>> {
        Ok(self
            .grants
            .read()
            .await
            .get(&(actor.clone(), page.clone()))
            .cloned())
    }

    async fn for_actor(&self, actor: &ActorId) -> Result<Vec<Grant>> {
        Ok(self
            .grants
            .read()
            .await
            .values()
            .filter(|g| &g.actor == actor)
            .cloned()
            .collect())
    }

    async fn for_page(&self, page: &PageId) -> Result<Vec<Grant>> {
        Ok(self
            .grants
            .read()
            .await
            .values()
            .filter(|g| &g.page == page)
            .cloned()
            .collect())
    }

    async fn remove(&self, actor: &ActorId, page: &PageId) -> Result<bool> {
        Ok(self
            .grants
            .write()
            .await
            .remove(&(actor.clone(), page.clone()))
            .is_some())
    }

    async fn remove_actor(&self, actor: &ActorId) -> Result<usize> {
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|(a, _), _| a != actor);
        let removed = before - grants.len();
        if removed > 0 {
            log::debug!("cascade-removed {removed} grant(s) for actor '{actor}'");
        }
        Ok(removed)
    }

    async fn remove_page(&self, page: &PageId) -> Result<usize> {
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|(_, p), _| p != page);
        let removed = before - grants.len();
        if removed > 0 {
            log::debug!("cascade-removed {removed} grant(s) for page '{page}'");
        }
        Ok(removed)
    }

    async fn rename_page(&self, from: &PageId, to: &PageId) -> Result<usize> {
        let mut grants = self.grants.write().await;
        let moved: Vec<Grant> = grants
            .values()
            .filter(|g| &g.page == from)
            .cloned()
            .collect();
        grants.retain(|(_, p), _| p != from);
        let count = moved.len();
        for mut grant in moved {
            grant.page = to.clone();
            grants.insert((grant.actor.clone(), to.clone()), grant);
        }
        Ok(count)
    }
}
