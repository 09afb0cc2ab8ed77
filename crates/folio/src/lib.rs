//! # folio
//!
//! Page-scoped authorization and audit fabric — umbrella crate.
//!
//! Re-exports the component crates and provides [`FolioService`], the
//! composition root that wires the identity directory, the catalog, the
//! grant store, and the authorization engine together, gating every
//! content operation and routing every body edit through audit capture.
//!
//! ```rust
//! use folio::{CapabilitySet, FolioService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), folio::ServiceError> {
//! let service = FolioService::new();
//! service.register_actor("root", true)?;
//! service.register_actor("alice", false)?;
//!
//! let docs = service.create_page(&"root".into(), "docs".into()).await?;
//! service
//!     .grant(&"root".into(), &"alice".into(), &docs.id, CapabilitySet::read_only())
//!     .await?;
//!
//! assert!(service.view_comments(&"alice".into(), &docs.id).await.is_ok());
//! assert!(
//!     service
//!         .add_comment(&"alice".into(), &docs.id, "hi".into())
//!         .await
//!         .is_err()
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod service;

pub use folio_acl as acl;
pub use folio_audit as audit;
pub use folio_catalog as catalog;
pub use folio_core as core;

pub use folio_acl::{AclEngine, CapabilitySet, Decision, DenyReason, Grant, Operation};
pub use folio_audit::HistoryRecord;
pub use folio_catalog::{Comment, MemoryCatalog, Page};
pub use folio_core::{ActorDirectory, ActorId, CommentId, Error, PageId};
pub use service::{FolioService, ServiceError, ServiceResult};
