//! The page entity: a named content scope.

use chrono::{DateTime, Utc};
use folio_core::PageId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named content scope, the unit of authorization.
///
/// A page's name is its identity and is unique across the catalog. The
/// only mutation a page supports is rename; everything else about it is
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// The unique page name.
    pub id: PageId,
    /// When the page was created.
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// Creates a page stamped with the current time.
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
        }
    }

    /// The page name.
    pub fn name(&self) -> &str {
        self.id.as_str()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
