//! Identity context: who is acting, and are they privileged.
//!
//! Folio consumes identity, it never issues it. Login, token minting, and
//! password resets all live outside this workspace; the only questions the
//! core asks are "does this actor exist" and "is this actor privileged".
//!
//! The context is always passed explicitly as an argument. Reading the
//! acting identity from thread-local or global state is a non-starter: it
//! breaks under work-stealing executors and makes the decision procedure
//! untestable.

use crate::error::{Error, Result};
use crate::ids::ActorId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// The identity context consumed by the authorization and audit engines.
///
/// Implementations must be `Send + Sync`; both engines are invoked
/// concurrently by independent requests.
///
/// # Errors
///
/// Both methods return [`Error::Unavailable`] when the backing mechanism
/// cannot be consulted. Callers must propagate that, never map it to a
/// default answer.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Returns whether the actor is known to the identity provider.
    async fn actor_exists(&self, actor: &ActorId) -> Result<bool>;

    /// Returns whether the actor bypasses all grant checks.
    ///
    /// Unknown actors are not privileged.
    async fn is_privileged(&self, actor: &ActorId) -> Result<bool>;
}

/// In-memory [`Identity`] implementation.
///
/// A plain directory of actor IDs with a privileged flag each. Suitable
/// for embedding and for tests; a production deployment would implement
/// [`Identity`] against its real identity provider instead.
#[derive(Debug, Default)]
pub struct ActorDirectory {
    actors: RwLock<HashMap<ActorId, bool>>,
}

impl ActorDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor, replacing any previous entry.
    pub fn register<A: Into<ActorId>>(&self, actor: A, privileged: bool) -> Result<()> {
        let actor = actor.into();
        log::info!("registering actor '{actor}' (privileged: {privileged})");
        self.write()?.insert(actor, privileged);
        Ok(())
    }

    /// Removes an actor. Returns `true` if the actor was present.
    ///
    /// Removal does not touch grants; the service layer owns that cascade.
    pub fn remove(&self, actor: &ActorId) -> Result<bool> {
        Ok(self.write()?.remove(actor).is_some())
    }

    /// Returns the number of registered actors.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if no actors are registered.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ActorId, bool>>> {
        self.actors
            .read()
            .map_err(|_| Error::unavailable("actor directory lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ActorId, bool>>> {
        self.actors
            .write()
            .map_err(|_| Error::unavailable("actor directory lock poisoned"))
    }
}

#[async_trait]
impl Identity for ActorDirectory {
    async fn actor_exists(&self, actor: &ActorId) -> Result<bool> {
        Ok(self.read()?.contains_key(actor))
    }

    async fn is_privileged(&self, actor: &ActorId) -> Result<bool> {
        Ok(self.read()?.get(actor).copied().unwrap_or(false))
    }
}
