//! The grant record: one capability set per (actor, page) pair.

use crate::capability::{CapabilitySet, Operation};
use chrono::{DateTime, Utc};
use folio_core::{ActorId, PageId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The capability set one actor holds over one page.
///
/// At most one grant exists per (actor, page) pair; the store enforces
/// this by construction (upsert replaces, never duplicates). There is no
/// inheritance between pages: a grant on "docs" says nothing about
/// "docs-internal".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// The actor holding the capabilities.
    pub actor: ActorId,
    /// The page the capabilities apply to.
    pub page: PageId,
    /// The four flags.
    pub capabilities: CapabilitySet,
    /// When the grant was created or last replaced.
    pub granted_at: DateTime<Utc>,
}

impl Grant {
    /// Creates a grant stamped with the current time.
    pub fn new(actor: ActorId, page: PageId, capabilities: CapabilitySet) -> Self {
        Self {
            actor,
            page,
            capabilities,
            granted_at: Utc::now(),
        }
    }

    /// Returns whether this grant permits `op`.
    pub fn allows(&self, op: Operation) -> bool {
        self.capabilities.allows(op)
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}: {}", self.actor, self.page, self.capabilities)
    }
}
