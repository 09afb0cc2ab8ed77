//! The authorization decision procedure.

use crate::capability::Operation;
use crate::store::GrantStore;
use async_trait::async_trait;
use folio_core::{ActorId, Identity, PageId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Resolves whether a page exists.
///
/// Defined here, implemented by the catalog (or by whatever owns page
/// identity in a deployment). Keeps `folio-acl` free of any dependency on
/// content storage.
#[async_trait]
pub trait PageResolver: Send + Sync {
    /// Returns whether a page with this identifier exists.
    async fn page_exists(&self, page: &PageId) -> Result<bool>;
}

/// Why an operation was denied.
///
/// Every reason fails closed; the distinction exists so callers can log
/// precisely and, if they choose, surface "no page supplied" as a
/// validation problem rather than an access problem. Externally the two
/// may be masked to the same response to avoid existence leakage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// The request did not name a page at all.
    MissingPage,
    /// The named page does not exist.
    UnknownPage,
    /// The actor holds no grant on the page.
    NoGrant,
    /// The actor holds a grant, but the flag for this operation is off.
    NotPermitted(Operation),
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPage => write!(f, "no page supplied"),
            Self::UnknownPage => write!(f, "page does not exist"),
            Self::NoGrant => write!(f, "no grant on page"),
            Self::NotPermitted(op) => write!(f, "grant does not permit {op}"),
        }
    }
}

/// The outcome of an authorization check.
///
/// `Deny` is a normal, expected value — never an error, never logged as
/// one. A store that cannot be consulted surfaces as
/// [`Error::Unavailable`](folio_core::Error::Unavailable) instead, which
/// callers must propagate rather than read as either outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation must be rejected, with the recorded reason.
    Deny(DenyReason),
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny(reason) => write!(f, "deny ({reason})"),
        }
    }
}

/// The authorization engine.
///
/// A pure decision function over the identity context, the page resolver,
/// and the grant store: it mutates nothing and is safe to call from any
/// number of concurrent requests. Every (actor, page, operation) input
/// maps to exactly one outcome.
#[derive(Clone)]
pub struct AclEngine {
    identity: Arc<dyn Identity>,
    pages: Arc<dyn PageResolver>,
    grants: Arc<dyn GrantStore>,
}

impl AclEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        identity: Arc<dyn Identity>,
        pages: Arc<dyn PageResolver>,
        grants: Arc<dyn GrantStore>,
    ) -> Self {
        Self {
            identity,
            pages,
            grants,
        }
    }

    /// Decides whether `actor` may perform `op` against `page`.
    ///
    /// The procedure, in order:
    ///
    /// 1. Privileged actor → [`Decision::Allow`], unconditionally. The
    ///    sole bypass; no grant or page lookup happens at all, so a
    ///    privileged actor is allowed even on nonexistent pages.
    /// 2. `page` is `None` or empty → `Deny(MissingPage)`.
    /// 3. The page does not resolve → `Deny(UnknownPage)`.
    /// 4. No grant for (actor, page) → `Deny(NoGrant)`.
    /// 5. Otherwise allow iff the grant's flag for `op` is set.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Unavailable`](folio_core::Error::Unavailable)
    /// from any collaborator. An unavailable store means "cannot decide",
    /// never "deny".
    pub async fn authorize(
        &self,
        actor: &ActorId,
        page: Option<&PageId>,
        op: Operation,
    ) -> Result<Decision> {
        if self.identity.is_privileged(actor).await? {
            log::debug!("authorize {actor} {op}: allow (privileged)");
            return Ok(Decision::Allow);
        }

        let Some(page) = page.filter(|p| !p.is_empty()) else {
            log::debug!("authorize {actor} {op}: deny (no page supplied)");
            return Ok(Decision::Deny(DenyReason::MissingPage));
        };

        if !self.pages.page_exists(page).await? {
            log::debug!("authorize {actor} {op} on '{page}': deny (unknown page)");
            return Ok(Decision::Deny(DenyReason::UnknownPage));
        }

        let decision = match self.grants.get(actor, page).await? {
            None => Decision::Deny(DenyReason::NoGrant),
            Some(grant) if grant.allows(op) => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::NotPermitted(op)),
        };
        log::debug!("authorize {actor} {op} on '{page}': {decision}");
        Ok(decision)
    }
}

impl fmt::Debug for AclEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AclEngine").finish_non_exhaustive()
    }
}
