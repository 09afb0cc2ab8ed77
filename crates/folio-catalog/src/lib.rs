//! # folio-catalog
//!
//! The resource catalog: named pages and the comments attached to them.
//!
//! Pages are the unit of authorization; the catalog owns their identity
//! and existence (it implements [`folio_acl::PageResolver`]). Comments
//! are the mutable content items; every body edit runs through the
//! audited update path, which commits the new body and its
//! [`HistoryRecord`](folio_audit::HistoryRecord) as one atomic unit under
//! per-comment exclusivity.
//!
//! Ownership cascades: deleting a page deletes its comments, and deleting
//! a comment deletes its history. (Grants cascade too, but grants live in
//! `folio-acl`; the service layer in `folio` wires that cascade.)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod comment;
pub mod history;
pub mod page;

pub use catalog::MemoryCatalog;
pub use comment::Comment;
pub use history::{HistoryStore, MemoryHistoryStore};
pub use page::Page;
