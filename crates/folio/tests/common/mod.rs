//! Common test harness for Folio integration tests.

use folio::{ActorId, CapabilitySet, FolioService, PageId};

/// A service pre-provisioned with the standard cast: `root` (privileged),
/// `alice` and `bob` (not), and a page named `docs`.
pub struct TestHarness {
    pub service: FolioService,
}

impl TestHarness {
    pub async fn new() -> Self {
        let service = FolioService::new();
        service.register_actor("root", true).unwrap();
        service.register_actor("alice", false).unwrap();
        service.register_actor("bob", false).unwrap();
        service
            .create_page(&root(), PageId::from("docs"))
            .await
            .unwrap();
        Self { service }
    }

    /// Grants `capabilities` on `docs` to `actor`, acting as root.
    pub async fn grant_on_docs(&self, actor: &ActorId, capabilities: CapabilitySet) {
        self.service
            .grant(&root(), actor, &docs(), capabilities)
            .await
            .unwrap();
    }
}

pub fn root() -> ActorId {
    ActorId::from("root")
}

pub fn alice() -> ActorId {
    ActorId::from("alice")
}

pub fn bob() -> ActorId {
    ActorId::from("bob")
}

pub fn docs() -> PageId {
    PageId::from("docs")
}
