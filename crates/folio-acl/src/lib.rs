//! # folio-acl
//!
//! Access control for the Folio fabric:
//! - [`Operation`] — the closed set of things an actor can do to a page
//! - [`CapabilitySet`] — the four independent flags one grant carries
//! - [`Grant`] and [`GrantStore`] — one capability set per (actor, page)
//! - [`AclEngine`] — the deterministic allow/deny decision procedure
//!
//! # Decision model
//!
//! ```text
//! authorize(actor, page, operation):
//!     privileged actor        → Allow            (sole bypass)
//!     no page supplied        → Deny(MissingPage)
//!     page does not resolve   → Deny(UnknownPage)
//!     no grant for the pair   → Deny(NoGrant)
//!     flag for operation off  → Deny(NotPermitted)
//!     flag on                 → Allow
//! ```
//!
//! Deny is a value, not an error. Infrastructure failure is
//! [`Error::Unavailable`](folio_core::Error::Unavailable) and means
//! "cannot decide" — it is never folded into either outcome.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod engine;
pub mod grant;
pub mod store;

pub use capability::{CapabilitySet, Operation};
pub use engine::{AclEngine, Decision, DenyReason, PageResolver};
pub use grant::Grant;
pub use store::{GrantStore, MemoryGrantStore};
